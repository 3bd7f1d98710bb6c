//! Selection handles, resize math and the selection frame.

use crate::geometry::{self, point_in_rotated_rect};
use crate::shapes::Shape;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Side length of a handle's square hit box, in world units.
pub const HANDLE_SIZE: f64 = 8.0;
/// Distance from the top edge to the rotation handle.
pub const ROTATE_HANDLE_OFFSET: f64 = 25.0;

/// Handle layout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandleMetrics {
    pub size: f64,
    pub rotate_offset: f64,
}

impl Default for HandleMetrics {
    fn default() -> Self {
        Self {
            size: HANDLE_SIZE,
            rotate_offset: ROTATE_HANDLE_OFFSET,
        }
    }
}

/// Type of selection handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    /// Endpoint handle for lines.
    Endpoint(Endpoint),
    /// Corner handle for rectangles/ellipses.
    Corner(Corner),
    /// Edge midpoint handle for rectangles/ellipses.
    Edge(Edge),
    /// Rotation handle (positioned above the shape).
    Rotate,
}

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Line endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Endpoint {
    Start,
    End,
}

/// A selection handle with its position and type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    /// Center of the handle in the selection's unrotated frame.
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    /// Check if a point (in the unrotated frame) falls in this handle's
    /// square hit box. Edges of the box count as hits.
    pub fn hit_test(&self, point: Point, size: f64) -> bool {
        let half = size / 2.0;
        (point.x - self.position.x).abs() <= half && (point.y - self.position.y).abs() <= half
    }
}

/// Rotation handle centered above the top edge.
pub fn rotate_handle(bounds: Rect, metrics: &HandleMetrics) -> Handle {
    Handle::new(
        Point::new(bounds.center().x, bounds.y0 - metrics.rotate_offset),
        HandleKind::Rotate,
    )
}

/// Eight resize handles plus the rotation handle.
///
/// Resize handles sit just outside the box: corners are pushed out
/// diagonally and edge midpoints outward by half the handle size.
pub fn box_handles(bounds: Rect, metrics: &HandleMetrics) -> Vec<Handle> {
    let h = metrics.size / 2.0;
    let center = bounds.center();
    let (left, top) = (bounds.x0 - h, bounds.y0 - h);
    let (right, bottom) = (bounds.x1 + h, bounds.y1 + h);

    vec![
        rotate_handle(bounds, metrics),
        Handle::new(Point::new(left, top), HandleKind::Corner(Corner::TopLeft)),
        Handle::new(Point::new(right, top), HandleKind::Corner(Corner::TopRight)),
        Handle::new(Point::new(left, bottom), HandleKind::Corner(Corner::BottomLeft)),
        Handle::new(Point::new(right, bottom), HandleKind::Corner(Corner::BottomRight)),
        Handle::new(Point::new(center.x, top), HandleKind::Edge(Edge::Top)),
        Handle::new(Point::new(right, center.y), HandleKind::Edge(Edge::Right)),
        Handle::new(Point::new(center.x, bottom), HandleKind::Edge(Edge::Bottom)),
        Handle::new(Point::new(left, center.y), HandleKind::Edge(Edge::Left)),
    ]
}

/// Which sides of the box a handle drags: (left, top, right, bottom).
fn dragged_sides(kind: HandleKind) -> Option<(bool, bool, bool, bool)> {
    let sides = match kind {
        HandleKind::Corner(Corner::TopLeft) => (true, true, false, false),
        HandleKind::Corner(Corner::TopRight) => (false, true, true, false),
        HandleKind::Corner(Corner::BottomLeft) => (true, false, false, true),
        HandleKind::Corner(Corner::BottomRight) => (false, false, true, true),
        HandleKind::Edge(Edge::Top) => (false, true, false, false),
        HandleKind::Edge(Edge::Right) => (false, false, true, false),
        HandleKind::Edge(Edge::Bottom) => (false, false, false, true),
        HandleKind::Edge(Edge::Left) => (true, false, false, false),
        HandleKind::Endpoint(_) | HandleKind::Rotate => return None,
    };
    Some(sides)
}

/// Resize a box rotated by `angle` by dragging one of its handles by
/// `delta` (world space).
///
/// The side(s) opposite the handle stay fixed on screen. The delta is
/// taken into the box's local frame, the dragged sides move by it, and the
/// result is shifted so that rotating it about its own new center lands the
/// fixed anchor where it was. The returned rect is signed: dragging past
/// the anchor yields a negative extent.
///
/// Returns `None` for handles that do not resize (rotation, endpoints).
pub fn resize_rotated(bounds: Rect, angle: f64, kind: HandleKind, delta: Vec2) -> Option<Rect> {
    let (left, top, right, bottom) = dragged_sides(kind)?;
    let (sin, cos) = angle.sin_cos();
    let local = Vec2::new(delta.x * cos + delta.y * sin, -delta.x * sin + delta.y * cos);

    let mut resized = bounds;
    if left {
        resized.x0 += local.x;
    }
    if right {
        resized.x1 += local.x;
    }
    if top {
        resized.y0 += local.y;
    }
    if bottom {
        resized.y1 += local.y;
    }

    // Where the resized box's center lands when drawn about the old center.
    let old_center = bounds.center();
    let new_center = geometry::rotate(resized.center(), old_center, angle);
    Some(resized + (new_center - resized.center()))
}

/// The box that handles and selection hit-tests are laid out on.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionFrame {
    /// Unrotated bounds.
    pub bounds: Rect,
    /// Rotation about the bounds center.
    pub angle: f64,
    pub handles: Vec<Handle>,
}

impl SelectionFrame {
    /// Frame for the given selection, or `None` when nothing is selected.
    ///
    /// A single shape contributes its own bounds, rotation and handles. A
    /// multi-selection uses the world-aligned aggregate bounds and exposes
    /// no handles.
    pub fn for_selection(selected: &[&Shape], metrics: &HandleMetrics) -> Option<Self> {
        match selected {
            [] => None,
            [shape] => Some(Self {
                bounds: shape.bounds(),
                angle: shape.rotation(),
                handles: shape.handles(metrics),
            }),
            many => {
                let bounds = geometry::compute_aggregate_bounds(many.iter().copied())?;
                Some(Self {
                    bounds,
                    angle: 0.0,
                    handles: Vec::new(),
                })
            }
        }
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    /// Check whether a world point lies inside the (rotated) frame.
    pub fn contains(&self, point: Point) -> bool {
        let corner1 = Point::new(self.bounds.x0, self.bounds.y0);
        let corner2 = Point::new(self.bounds.x1, self.bounds.y1);
        point_in_rotated_rect(corner1, corner2, self.angle, point)
    }

    /// Bring a world point into the frame's unrotated coordinates.
    pub fn to_local(&self, point: Point) -> Point {
        geometry::rotate(point, self.center(), -self.angle)
    }

    /// First handle hit by a world point.
    pub fn hit_handle(&self, point: Point, metrics: &HandleMetrics) -> Option<Handle> {
        let local = self.to_local(point);
        self.handles
            .iter()
            .find(|handle| handle.hit_test(local, metrics.size))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Freehand, Line, Rectangle};
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    fn approx_rect(a: Rect, b: Rect) -> bool {
        (a.x0 - b.x0).abs() < EPS
            && (a.y0 - b.y0).abs() < EPS
            && (a.x1 - b.x1).abs() < EPS
            && (a.y1 - b.y1).abs() < EPS
    }

    fn square() -> Rect {
        Rect::new(0.0, 0.0, 100.0, 100.0)
    }

    #[test]
    fn test_handle_layout() {
        let handles = box_handles(square(), &HandleMetrics::default());
        assert_eq!(handles.len(), 9);
        let find = |kind| handles.iter().find(|h| h.kind == kind).unwrap().position;
        assert_eq!(find(HandleKind::Rotate), Point::new(50.0, -25.0));
        assert_eq!(find(HandleKind::Corner(Corner::TopLeft)), Point::new(-4.0, -4.0));
        assert_eq!(find(HandleKind::Corner(Corner::BottomRight)), Point::new(104.0, 104.0));
        assert_eq!(find(HandleKind::Edge(Edge::Top)), Point::new(50.0, -4.0));
        assert_eq!(find(HandleKind::Edge(Edge::Right)), Point::new(104.0, 50.0));
        assert_eq!(find(HandleKind::Edge(Edge::Left)), Point::new(-4.0, 50.0));
    }

    #[test]
    fn test_handle_hit_box_is_inclusive() {
        let handle = Handle::new(Point::new(10.0, 10.0), HandleKind::Rotate);
        assert!(handle.hit_test(Point::new(14.0, 6.0), 8.0));
        assert!(!handle.hit_test(Point::new(14.1, 10.0), 8.0));
    }

    #[test]
    fn test_resize_unrotated_corners() {
        let se = HandleKind::Corner(Corner::BottomRight);
        let nw = HandleKind::Corner(Corner::TopLeft);
        let r = resize_rotated(square(), 0.0, se, Vec2::new(50.0, 50.0)).unwrap();
        assert!(approx_rect(r, Rect::new(0.0, 0.0, 150.0, 150.0)));
        let r = resize_rotated(square(), 0.0, nw, Vec2::new(-50.0, -50.0)).unwrap();
        assert!(approx_rect(r, Rect::new(-50.0, -50.0, 100.0, 100.0)));
        assert!((r.width() - 150.0).abs() < EPS);
    }

    #[test]
    fn test_resize_edge_moves_one_side() {
        let r = resize_rotated(square(), 0.0, HandleKind::Edge(Edge::Left), Vec2::new(20.0, 35.0));
        assert!(approx_rect(r.unwrap(), Rect::new(20.0, 0.0, 100.0, 100.0)));
    }

    #[test]
    fn test_resize_past_anchor_is_signed() {
        let r = resize_rotated(
            square(),
            0.0,
            HandleKind::Corner(Corner::BottomRight),
            Vec2::new(-150.0, -120.0),
        )
        .unwrap();
        assert!((r.width() + 50.0).abs() < EPS);
        assert!((r.height() + 20.0).abs() < EPS);
    }

    #[test]
    fn test_resize_rotated_keeps_anchor() {
        let angle = 0.6;
        let bounds = Rect::new(10.0, 20.0, 110.0, 70.0);
        let before = geometry::rotated_corners(bounds, angle);
        let r = resize_rotated(
            bounds,
            angle,
            HandleKind::Corner(Corner::BottomRight),
            Vec2::new(30.0, -12.0),
        )
        .unwrap();
        let after = geometry::rotated_corners(r, angle);
        // Top-left is opposite the dragged corner.
        assert!((after[0] - before[0]).hypot() < EPS);
    }

    #[test]
    fn test_resize_rotated_quarter_turn_maps_delta() {
        // Turned a quarter, dragging the right edge "down" on screen
        // widens the box.
        let r = resize_rotated(
            square(),
            FRAC_PI_2,
            HandleKind::Edge(Edge::Right),
            Vec2::new(0.0, 40.0),
        )
        .unwrap();
        assert!((r.width() - 140.0).abs() < EPS);
        assert!((r.height() - 100.0).abs() < EPS);
    }

    #[test]
    fn test_resize_ignores_non_resize_handles() {
        assert!(resize_rotated(square(), 0.0, HandleKind::Rotate, Vec2::new(1.0, 1.0)).is_none());
        let end = HandleKind::Endpoint(Endpoint::End);
        assert!(resize_rotated(square(), 0.0, end, Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_frame_single_shape() {
        let mut rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        rect.rotation = 0.25;
        let shape = Shape::Rectangle(rect);
        let frame = SelectionFrame::for_selection(&[&shape], &HandleMetrics::default()).unwrap();
        assert_eq!(frame.bounds, square());
        assert_eq!(frame.angle, 0.25);
        assert_eq!(frame.handles.len(), 9);
    }

    #[test]
    fn test_frame_multi_has_no_handles() {
        let a = Shape::Rectangle(Rectangle::new(Point::new(0.0, 0.0), 10.0, 10.0));
        let b = Shape::Rectangle(Rectangle::new(Point::new(40.0, 40.0), 10.0, 10.0));
        let frame = SelectionFrame::for_selection(&[&a, &b], &HandleMetrics::default()).unwrap();
        assert_eq!(frame.bounds, Rect::new(0.0, 0.0, 50.0, 50.0));
        assert!(frame.handles.is_empty());
        assert!(frame.contains(Point::new(25.0, 25.0)));
        assert!(SelectionFrame::for_selection(&[], &HandleMetrics::default()).is_none());
    }

    #[test]
    fn test_frame_handle_hit_undoes_rotation() {
        let mut rect = Rectangle::new(Point::new(0.0, 0.0), 100.0, 100.0);
        rect.rotation = FRAC_PI_2;
        let shape = Shape::Rectangle(rect);
        let metrics = HandleMetrics::default();
        let frame = SelectionFrame::for_selection(&[&shape], &metrics).unwrap();

        // Unrotated the rotation handle is at (50, -25); a quarter turn
        // about (50, 50) carries it to (125, 50).
        let hit = frame.hit_handle(Point::new(125.0, 50.0), &metrics).unwrap();
        assert_eq!(hit.kind, HandleKind::Rotate);
        assert!(frame.hit_handle(Point::new(50.0, -25.0), &metrics).is_none());
    }

    #[test]
    fn test_handle_sets_per_variant() {
        let metrics = HandleMetrics::default();
        let line = Shape::Line(Line::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0)));
        let kinds: Vec<_> = line.handles(&metrics).iter().map(|h| h.kind).collect();
        assert_eq!(
            kinds,
            vec![
                HandleKind::Endpoint(Endpoint::Start),
                HandleKind::Endpoint(Endpoint::End)
            ]
        );

        let freehand = Shape::Freehand(Freehand::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(20.0, 5.0),
        ]));
        let kinds: Vec<_> = freehand.handles(&metrics).iter().map(|h| h.kind).collect();
        assert_eq!(kinds, vec![HandleKind::Rotate]);
    }
}
