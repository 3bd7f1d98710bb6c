//! Rectangle shape.

use super::{
    MoveOffsets, ShapeId, ShapeStyle, ShapeTrait, box_contains, normalize_in_place, signed_box,
    translate_origin,
};
use crate::selection::{Handle, HandleMetrics, box_handles};
use crate::surface::{Surface, with_saved};
use kurbo::{Point, Rect};
use uuid::Uuid;

/// An axis-aligned rectangle, optionally rotated about its center.
#[derive(Debug, Clone)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Origin corner. Together with a signed size this may be any corner
    /// while a gesture is in progress.
    pub position: Point,
    /// Width of the rectangle (negative only mid-gesture).
    pub width: f64,
    /// Height of the rectangle (negative only mid-gesture).
    pub height: f64,
    /// Rotation angle in radians (around center).
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
    pub(crate) selected: bool,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            width,
            height,
            rotation: 0.0,
            style: ShapeStyle::default(),
            selected: false,
        }
    }

    /// Create a normalized rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let rect = Rect::from_points(p1, p2);
        Self::new(rect.origin(), rect.width(), rect.height())
    }

    /// A signed rectangle from `anchor` to `current`, as drawn mid-drag.
    pub fn spanning(anchor: Point, current: Point) -> Self {
        Self::new(anchor, current.x - anchor.x, current.y - anchor.y)
    }

    /// Get the rectangle as a signed kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        signed_box(self.position, self.width, self.height)
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        self.as_rect().abs()
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }

    fn contains(&self, point: Point) -> bool {
        box_contains(self.position, self.width, self.height, self.rotation, point)
    }

    fn handles(&self, metrics: &HandleMetrics) -> Vec<Handle> {
        box_handles(self.bounds(), metrics)
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let center = self.as_rect().center();
        let (hw, hh) = (self.width.abs() / 2.0, self.height.abs() / 2.0);
        with_saved(surface, |s| {
            s.translate(center.to_vec2());
            s.rotate(self.rotation);
            s.begin_path();
            s.rect(Rect::new(-hw, -hh, hw, hh));
            self.style.paint(s);
        });
    }

    fn move_offsets(&self, pointer: Point) -> MoveOffsets {
        MoveOffsets::Origin(pointer - self.position)
    }

    fn translate(&mut self, pointer: Point, offsets: &MoveOffsets) {
        translate_origin(&mut self.position, pointer, offsets, "rectangle");
    }

    fn normalize(&mut self) {
        normalize_in_place(&mut self.position, &mut self.width, &mut self.height);
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
