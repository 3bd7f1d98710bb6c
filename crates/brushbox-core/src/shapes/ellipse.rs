//! Ellipse shape.

use super::{
    MoveOffsets, ShapeId, ShapeStyle, ShapeTrait, box_contains, normalize_in_place, signed_box,
    translate_origin,
};
use crate::selection::{Handle, HandleMetrics, box_handles};
use crate::surface::{Surface, with_saved};
use kurbo::{Point, Rect, Vec2};
use uuid::Uuid;

/// An ellipse inscribed in a box.
///
/// Hit-testing uses the bounding box, so clicks in the corners outside the
/// curve still select the ellipse.
#[derive(Debug, Clone)]
pub struct Ellipse {
    pub(crate) id: ShapeId,
    /// Origin corner of the bounding box.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Rotation angle in radians (around center).
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
    pub(crate) selected: bool,
}

impl Ellipse {
    /// Create a new ellipse from its bounding box.
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

    /// Create a circle.
    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center - Vec2::new(radius, radius), radius * 2.0, radius * 2.0)
    }

    /// A signed ellipse box from `anchor` to `current`, as drawn mid-drag.
    pub fn spanning(anchor: Point, current: Point) -> Self {
        Self::new(anchor, current.x - anchor.x, current.y - anchor.y)
    }

    pub fn center(&self) -> Point {
        signed_box(self.position, self.width, self.height).center()
    }

    pub fn radii(&self) -> Vec2 {
        Vec2::new(self.width.abs() / 2.0, self.height.abs() / 2.0)
    }
}

impl ShapeTrait for Ellipse {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        signed_box(self.position, self.width, self.height).abs()
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
        let center = self.center();
        let radii = self.radii();
        with_saved(surface, |s| {
            s.translate(center.to_vec2());
            s.rotate(self.rotation);
            s.begin_path();
            s.ellipse(Point::ZERO, radii, 0.0);
            self.style.paint(s);
        });
    }

    fn move_offsets(&self, pointer: Point) -> MoveOffsets {
        MoveOffsets::Origin(pointer - self.position)
    }

    fn translate(&mut self, pointer: Point, offsets: &MoveOffsets) {
        translate_origin(&mut self.position, pointer, offsets, "ellipse");
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::testing::RecordingSurface;

    #[test]
    fn test_ellipse_creation() {
        let ellipse = Ellipse::new(Point::new(0.0, 0.0), 100.0, 50.0);
        assert_eq!(ellipse.center(), Point::new(50.0, 25.0));
        assert_eq!(ellipse.radii(), Vec2::new(50.0, 25.0));
    }

    #[test]
    fn test_circle() {
        let circle = Ellipse::circle(Point::new(50.0, 50.0), 25.0);
        assert_eq!(circle.bounds(), Rect::new(25.0, 25.0, 75.0, 75.0));
    }

    #[test]
    fn test_contains_uses_bounding_box() {
        let ellipse = Ellipse::new(Point::new(0.0, 0.0), 100.0, 100.0);
        assert!(ellipse.contains(Point::new(50.0, 50.0)));
        // Outside the curve, inside the box.
        assert!(ellipse.contains(Point::new(2.0, 2.0)));
        assert!(!ellipse.contains(Point::new(-2.0, 50.0)));
    }

    #[test]
    fn test_spanning_normalizes_to_same_center() {
        let mut ellipse = Ellipse::spanning(Point::new(100.0, 100.0), Point::new(20.0, 60.0));
        let center = ellipse.center();
        ellipse.normalize();
        assert_eq!(ellipse.center(), center);
        assert_eq!(ellipse.bounds(), Rect::new(20.0, 60.0, 100.0, 100.0));
    }

    #[test]
    fn test_draw() {
        let ellipse = Ellipse::new(Point::new(10.0, 10.0), 40.0, 20.0);
        let mut surface = RecordingSurface::new();
        ellipse.draw(&mut surface);
        assert!(surface.calls.contains(&"ellipse 0 0 20 10".to_string()));
        assert_eq!(surface.depth(), 0);
    }
}
