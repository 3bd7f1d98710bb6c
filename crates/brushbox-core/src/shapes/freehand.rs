//! Freehand drawing shape.

use super::{MoveOffsets, ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{self, SEGMENT_HIT_TOLERANCE, point_near_segment};
use crate::selection::{Handle, HandleMetrics, rotate_handle};
use crate::surface::{Surface, with_saved};
use kurbo::{Point, Rect};
use uuid::Uuid;

/// A freehand drawing (series of points).
#[derive(Debug, Clone)]
pub struct Freehand {
    pub(crate) id: ShapeId,
    /// Points in the freehand path.
    pub points: Vec<Point>,
    /// Rotation in radians about the bounds center.
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
    pub(crate) selected: bool,
}

impl Freehand {
    /// Start a stroke at `start`.
    pub fn new(start: Point) -> Self {
        Self::from_points(vec![start])
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            rotation: 0.0,
            style: ShapeStyle::default(),
            selected: false,
        }
    }

    /// Add a point to the path.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl ShapeTrait for Freehand {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        geometry::bounds_of_points(&self.points).unwrap_or(Rect::ZERO)
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }

    fn contains(&self, point: Point) -> bool {
        let local = geometry::rotate(point, self.bounds().center(), -self.rotation);
        self.points
            .windows(2)
            .any(|w| point_near_segment(w[0], w[1], local, SEGMENT_HIT_TOLERANCE))
    }

    fn handles(&self, metrics: &HandleMetrics) -> Vec<Handle> {
        vec![rotate_handle(self.bounds(), metrics)]
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let Some((first, rest)) = self.points.split_first() else {
            return;
        };
        let center = self.bounds().center();
        with_saved(surface, |s| {
            s.translate(center.to_vec2());
            s.rotate(self.rotation);
            s.begin_path();
            s.move_to((*first - center).to_point());
            for point in rest {
                s.line_to((*point - center).to_point());
            }
            s.set_stroke_color(self.style.stroke());
            s.set_line_width(self.style.stroke_width);
            s.stroke();
        });
    }

    fn move_offsets(&self, pointer: Point) -> MoveOffsets {
        MoveOffsets::Points(self.points.iter().map(|p| pointer - *p).collect())
    }

    fn translate(&mut self, pointer: Point, offsets: &MoveOffsets) {
        match offsets {
            MoveOffsets::Points(offsets) if offsets.len() == self.points.len() => {
                for (point, offset) in self.points.iter_mut().zip(offsets) {
                    *point = pointer - *offset;
                }
            }
            other => log::warn!("Ignoring {other:?} offsets for a freehand stroke"),
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
