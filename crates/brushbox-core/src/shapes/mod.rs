//! Shape definitions for the whiteboard.

mod ellipse;
mod freehand;
mod line;
mod rectangle;
mod text;

pub use ellipse::Ellipse;
pub use freehand::Freehand;
pub use line::Line;
pub use rectangle::Rectangle;
pub use text::{APPROXIMATE_CHAR_WIDTH, Text};

use crate::error::{BrushboxError, Result};
use crate::geometry::{self, point_in_rotated_rect};
use crate::selection::{self, Endpoint, Handle, HandleKind, HandleMetrics};
use crate::surface::Surface;
use kurbo::{Point, Rect, Vec2};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }

    pub fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// Style properties for shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    /// Stroke color.
    pub stroke_color: SerializableColor,
    /// Stroke width.
    pub stroke_width: f64,
    /// Fill color (None = no fill).
    pub fill_color: Option<SerializableColor>,
}

impl ShapeStyle {
    /// Get the stroke color as a peniko Color.
    pub fn stroke(&self) -> Color {
        self.stroke_color.into()
    }

    /// Get the fill color as a peniko Color.
    pub fn fill(&self) -> Option<Color> {
        self.fill_color.map(|c| c.into())
    }

    pub fn set_stroke(&mut self, color: Color) {
        self.stroke_color = color.into();
    }

    pub fn set_fill(&mut self, color: Option<Color>) {
        self.fill_color = color.map(|c| c.into());
    }

    /// Fill (when a fill color is set) and then stroke the current path.
    pub(crate) fn paint(&self, surface: &mut dyn Surface) {
        if let Some(fill) = self.fill() {
            surface.set_fill_color(fill);
            surface.fill();
        }
        surface.set_stroke_color(self.stroke());
        surface.set_line_width(self.stroke_width);
        surface.stroke();
    }
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: SerializableColor::black(),
            stroke_width: 1.0,
            fill_color: None,
        }
    }
}

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// Pointer-to-shape offsets captured when a move gesture starts.
///
/// Each move places the shape at `pointer - offset`, so positions never
/// accumulate rounding from per-frame deltas.
#[derive(Debug, Clone, PartialEq)]
pub enum MoveOffsets {
    /// Offset to a box shape's origin.
    Origin(Vec2),
    /// Offsets to both line endpoints.
    Endpoints { start: Vec2, end: Vec2 },
    /// One offset per freehand sample.
    Points(Vec<Vec2>),
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    fn id(&self) -> ShapeId;

    /// Unrotated, normalized bounding box.
    fn bounds(&self) -> Rect;

    /// Rotation in radians about the bounds center.
    fn rotation(&self) -> f64;

    /// Set the absolute rotation.
    fn set_rotation(&mut self, angle: f64);

    /// Check whether a world point hits the shape.
    fn contains(&self, point: Point) -> bool;

    /// Handles offered when this shape is the only one selected.
    fn handles(&self, metrics: &HandleMetrics) -> Vec<Handle>;

    /// Draw the shape, scoping its rotation to this call.
    fn draw(&self, surface: &mut dyn Surface);

    /// Capture offsets for a move gesture starting at `pointer`.
    fn move_offsets(&self, pointer: Point) -> MoveOffsets;

    /// Place the shape relative to `pointer` using captured offsets.
    fn translate(&mut self, pointer: Point, offsets: &MoveOffsets);

    /// Flip a negative extent so width and height are non-negative.
    fn normalize(&mut self) {}

    fn style(&self) -> &ShapeStyle;

    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Signed box spanned by an origin and size.
pub(crate) fn signed_box(position: Point, width: f64, height: f64) -> Rect {
    Rect::new(position.x, position.y, position.x + width, position.y + height)
}

/// Rotated-rect containment for box-like shapes.
pub(crate) fn box_contains(position: Point, width: f64, height: f64, rotation: f64, point: Point) -> bool {
    let far = Point::new(position.x + width, position.y + height);
    point_in_rotated_rect(position, far, rotation, point)
}

/// Offset-based translate for box-like shapes.
pub(crate) fn translate_origin(position: &mut Point, pointer: Point, offsets: &MoveOffsets, kind: &str) {
    match offsets {
        MoveOffsets::Origin(offset) => *position = pointer - *offset,
        other => log::warn!("Ignoring {other:?} offsets for a {kind}"),
    }
}

/// Normalize a signed box in place.
pub(crate) fn normalize_in_place(position: &mut Point, width: &mut f64, height: &mut f64) {
    let rect = geometry::normalize_box(position.x, position.y, *width, *height);
    *position = rect.origin();
    *width = rect.width();
    *height = rect.height();
}

/// Every shape variant, dispatched through [`ShapeTrait`].
#[derive(Debug, Clone)]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Line(Line),
    Freehand(Freehand),
    Text(Text),
}

impl Shape {
    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Line(s) => s,
            Shape::Freehand(s) => s,
            Shape::Text(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Ellipse(s) => s,
            Shape::Line(s) => s,
            Shape::Freehand(s) => s,
            Shape::Text(s) => s,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.as_trait().id()
    }

    /// Lowercase variant name, for logs and errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Shape::Rectangle(_) => "rectangle",
            Shape::Ellipse(_) => "ellipse",
            Shape::Line(_) => "line",
            Shape::Freehand(_) => "freehand",
            Shape::Text(_) => "text",
        }
    }

    pub fn bounds(&self) -> Rect {
        self.as_trait().bounds()
    }

    pub fn rotation(&self) -> f64 {
        self.as_trait().rotation()
    }

    pub fn set_rotation(&mut self, angle: f64) {
        self.as_trait_mut().set_rotation(angle);
    }

    pub fn contains(&self, point: Point) -> bool {
        self.as_trait().contains(point)
    }

    pub fn handles(&self, metrics: &HandleMetrics) -> Vec<Handle> {
        self.as_trait().handles(metrics)
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.as_trait().draw(surface);
    }

    pub fn move_offsets(&self, pointer: Point) -> MoveOffsets {
        self.as_trait().move_offsets(pointer)
    }

    pub fn translate(&mut self, pointer: Point, offsets: &MoveOffsets) {
        self.as_trait_mut().translate(pointer, offsets);
    }

    pub fn normalize(&mut self) {
        self.as_trait_mut().normalize();
    }

    pub fn style(&self) -> &ShapeStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.as_trait_mut().style_mut()
    }

    /// Whether the scene currently has this shape selected.
    pub fn is_selected(&self) -> bool {
        match self {
            Shape::Rectangle(s) => s.selected,
            Shape::Ellipse(s) => s.selected,
            Shape::Line(s) => s.selected,
            Shape::Freehand(s) => s.selected,
            Shape::Text(s) => s.selected,
        }
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        match self {
            Shape::Rectangle(s) => s.selected = selected,
            Shape::Ellipse(s) => s.selected = selected,
            Shape::Line(s) => s.selected = selected,
            Shape::Freehand(s) => s.selected = selected,
            Shape::Text(s) => s.selected = selected,
        }
    }

    /// Resize from `start` bounds by dragging `handle` by `delta`.
    ///
    /// Only rectangles and ellipses resize; the result stays signed until
    /// [`normalize`](Self::normalize) is called.
    pub fn resize(&mut self, start: Rect, handle: HandleKind, delta: Vec2) -> Result<()> {
        let unsupported = BrushboxError::UnsupportedHandle {
            handle,
            shape: self.kind_name(),
        };
        let rotation = self.rotation();
        let (position, width, height) = match self {
            Shape::Rectangle(r) => (&mut r.position, &mut r.width, &mut r.height),
            Shape::Ellipse(e) => (&mut e.position, &mut e.width, &mut e.height),
            _ => return Err(unsupported),
        };
        let rect = selection::resize_rotated(start, rotation, handle, delta).ok_or(unsupported)?;
        *position = Point::new(rect.x0, rect.y0);
        *width = rect.width();
        *height = rect.height();
        Ok(())
    }

    /// Move one endpoint of a line to the world point `point`.
    pub fn set_endpoint(&mut self, endpoint: Endpoint, point: Point) -> Result<()> {
        match self {
            Shape::Line(line) => {
                line.move_endpoint(endpoint, point);
                Ok(())
            }
            other => Err(BrushboxError::UnsupportedHandle {
                handle: HandleKind::Endpoint(endpoint),
                shape: other.kind_name(),
            }),
        }
    }
}
