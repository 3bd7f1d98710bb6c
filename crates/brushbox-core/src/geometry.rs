//! Geometry helpers for hit-testing and bounding boxes.
//!
//! Everything here is pure. Angles are in radians and follow kurbo's
//! convention: in a y-down space a positive angle turns clockwise.

use crate::shapes::Shape;
use kurbo::{Affine, Point, Rect};

/// Tolerance used by [`point_near_segment`] when hit-testing strokes.
pub const SEGMENT_HIT_TOLERANCE: f64 = 1.0;

/// Rotate `point` about `center` by `angle`.
pub fn rotate(point: Point, center: Point, angle: f64) -> Point {
    Affine::rotate_about(angle, center) * point
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    a.distance(b)
}

/// Check whether `point` lies inside the rectangle spanned by `corner1` and
/// `corner2` once that rectangle is rotated by `angle` about its center.
///
/// The point is brought back into the rectangle's local frame and checked
/// against the axis-aligned bounds. Edges count as inside.
pub fn point_in_rotated_rect(corner1: Point, corner2: Point, angle: f64, point: Point) -> bool {
    let rect = Rect::from_points(corner1, corner2);
    let local = rotate(point, rect.center(), -angle);
    local.x >= rect.x0 && local.x <= rect.x1 && local.y >= rect.y0 && local.y <= rect.y1
}

/// Check whether `point` is on segment `a`-`b`.
///
/// Uses the triangle inequality: on the segment `|AP| + |PB|` equals `|AB|`,
/// and it grows as the point moves away. Near the endpoints this accepts a
/// slightly wider band than the perpendicular distance would.
pub fn point_near_segment(a: Point, b: Point, point: Point, tolerance: f64) -> bool {
    let ab = distance(a, b);
    let ap = distance(a, point);
    let pb = distance(point, b);
    (ab - (ap + pb)).abs() < tolerance
}

/// Bounding box of a point sequence, or `None` when it is empty.
pub fn bounds_of_points(points: &[Point]) -> Option<Rect> {
    let first = points.first()?;
    let rect = points
        .iter()
        .skip(1)
        .fold(Rect::from_points(*first, *first), |acc, p| acc.union_pt(*p));
    Some(rect)
}

/// The four corners of `bounds` rotated by `angle` about its center,
/// in the order top-left, top-right, bottom-right, bottom-left.
pub fn rotated_corners(bounds: Rect, angle: f64) -> [Point; 4] {
    let center = bounds.center();
    [
        Point::new(bounds.x0, bounds.y0),
        Point::new(bounds.x1, bounds.y0),
        Point::new(bounds.x1, bounds.y1),
        Point::new(bounds.x0, bounds.y1),
    ]
    .map(|corner| rotate(corner, center, angle))
}

/// World-axis-aligned box enclosing `bounds` rotated by `angle`.
pub fn rotated_extent(bounds: Rect, angle: f64) -> Rect {
    let [a, b, c, d] = rotated_corners(bounds, angle);
    Rect::from_points(a, b).union_pt(c).union_pt(d)
}

/// Unrotated bounding box of a shape in its local frame.
pub fn compute_bounds(shape: &Shape) -> Rect {
    shape.bounds()
}

/// Box enclosing every shape's true rotated extent.
///
/// Each shape's corners are rotated by its own angle about its own center
/// before the min/max is taken, so the result is always world-axis-aligned.
/// Returns `None` for an empty iterator.
pub fn compute_aggregate_bounds<'a, I>(shapes: I) -> Option<Rect>
where
    I: IntoIterator<Item = &'a Shape>,
{
    shapes
        .into_iter()
        .map(|shape| rotated_extent(shape.bounds(), shape.rotation()))
        .reduce(|acc, extent| acc.union(extent))
}

/// Normalize a signed origin/size box so width and height are non-negative.
///
/// A negative extent moves the origin to the opposite edge; the center is
/// unchanged, so the shape looks identical under any rotation.
pub fn normalize_box(x: f64, y: f64, width: f64, height: f64) -> Rect {
    Rect::new(x, y, x + width, y + height).abs()
}
