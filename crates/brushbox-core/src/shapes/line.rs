//! Line shape.

use super::{MoveOffsets, ShapeId, ShapeStyle, ShapeTrait};
use crate::geometry::{self, SEGMENT_HIT_TOLERANCE, point_near_segment};
use crate::selection::{Endpoint, Handle, HandleKind, HandleMetrics};
use crate::surface::{Surface, with_saved};
use kurbo::{Point, Rect};
use uuid::Uuid;

/// A straight line segment.
#[derive(Debug, Clone)]
pub struct Line {
    pub(crate) id: ShapeId,
    /// Start point.
    pub start: Point,
    /// End point.
    pub end: Point,
    /// Rotation in radians about the midpoint.
    pub rotation: f64,
    /// Style properties.
    pub style: ShapeStyle,
    pub(crate) selected: bool,
}

impl Line {
    /// Create a new line.
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            start,
            end,
            rotation: 0.0,
            style: ShapeStyle::default(),
            selected: false,
        }
    }

    /// Get the length of the line.
    pub fn length(&self) -> f64 {
        geometry::distance(self.start, self.end)
    }

    /// Get the midpoint of the line.
    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    /// Drag one endpoint to `target` in world coordinates.
    ///
    /// The other endpoint keeps its drawn position. Rotation pivots on the
    /// midpoint, which moves with the drag, so both stored points are
    /// recomputed about the new midpoint.
    pub fn move_endpoint(&mut self, endpoint: Endpoint, target: Point) {
        let fixed = match endpoint {
            Endpoint::Start => self.end,
            Endpoint::End => self.start,
        };
        let fixed = geometry::rotate(fixed, self.midpoint(), self.rotation);
        let pivot = fixed.midpoint(target);
        let fixed = geometry::rotate(fixed, pivot, -self.rotation);
        let moved = geometry::rotate(target, pivot, -self.rotation);
        match endpoint {
            Endpoint::Start => (self.start, self.end) = (moved, fixed),
            Endpoint::End => (self.start, self.end) = (fixed, moved),
        }
    }
}

impl ShapeTrait for Line {
    fn id(&self) -> ShapeId {
        self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }

    fn contains(&self, point: Point) -> bool {
        let local = geometry::rotate(point, self.midpoint(), -self.rotation);
        point_near_segment(self.start, self.end, local, SEGMENT_HIT_TOLERANCE)
    }

    fn handles(&self, _metrics: &HandleMetrics) -> Vec<Handle> {
        vec![
            Handle::new(self.start, HandleKind::Endpoint(Endpoint::Start)),
            Handle::new(self.end, HandleKind::Endpoint(Endpoint::End)),
        ]
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let center = self.midpoint();
        with_saved(surface, |s| {
            s.translate(center.to_vec2());
            s.rotate(self.rotation);
            s.begin_path();
            s.move_to((self.start - center).to_point());
            s.line_to((self.end - center).to_point());
            s.set_stroke_color(self.style.stroke());
            s.set_line_width(self.style.stroke_width);
            s.stroke();
        });
    }

    fn move_offsets(&self, pointer: Point) -> MoveOffsets {
        MoveOffsets::Endpoints {
            start: pointer - self.start,
            end: pointer - self.end,
        }
    }

    fn translate(&mut self, pointer: Point, offsets: &MoveOffsets) {
        match offsets {
            MoveOffsets::Endpoints { start, end } => {
                self.start = pointer - *start;
                self.end = pointer - *end;
            }
            other => log::warn!("Ignoring {other:?} offsets for a line"),
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}
