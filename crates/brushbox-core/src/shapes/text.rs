//! Text shape.

use super::{
    MoveOffsets, ShapeId, ShapeStyle, ShapeTrait, box_contains, normalize_in_place, signed_box,
    translate_origin,
};
use crate::selection::{Handle, HandleMetrics, rotate_handle};
use crate::surface::{Surface, TextBaseline, with_saved};
use kurbo::{Point, Rect};
use uuid::Uuid;

/// Advance per character, as a fraction of the font size, used when no
/// measuring surface is available.
pub const APPROXIMATE_CHAR_WIDTH: f64 = 0.6;

/// A block of (possibly multi-line) text.
#[derive(Debug, Clone)]
pub struct Text {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Layout width; fitted to the content on commit.
    pub width: f64,
    /// Layout height; line count times line advance.
    pub height: f64,
    /// Text content.
    pub content: String,
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    /// Line advance as a multiple of the font size.
    pub line_height: f64,
    /// Rotation angle in radians (around center).
    pub rotation: f64,
    /// Style properties. The stroke color is the text color.
    pub style: ShapeStyle,
    pub(crate) selected: bool,
}

impl Text {
    /// Create a new text shape sized by the character-count approximation.
    pub fn new(
        position: Point,
        content: impl Into<String>,
        font_family: impl Into<String>,
        font_size: f64,
    ) -> Self {
        let mut text = Self {
            id: Uuid::new_v4(),
            position,
            width: 0.0,
            height: 0.0,
            content: content.into(),
            font_family: font_family.into(),
            font_size,
            line_height: 1.0,
            rotation: 0.0,
            style: ShapeStyle::default(),
            selected: false,
        };
        text.fit(|line| line.chars().count() as f64 * font_size * APPROXIMATE_CHAR_WIDTH, 0.0);
        text
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self.height = self.line_count() as f64 * self.line_advance();
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Lines of the content; empty content is one empty line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }

    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Vertical distance between consecutive lines.
    pub fn line_advance(&self) -> f64 {
        self.font_size * self.line_height
    }

    /// Size the box to the content: the widest measured line (never below
    /// `min_width`) by the line count times the line advance.
    pub fn fit(&mut self, mut measure: impl FnMut(&str) -> f64, min_width: f64) {
        let widest = self.lines().map(&mut measure).fold(0.0, f64::max);
        self.width = widest.max(min_width);
        self.height = self.line_count() as f64 * self.line_advance();
    }
}

impl ShapeTrait for Text {
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
        vec![rotate_handle(self.bounds(), metrics)]
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let bounds = self.bounds();
        let center = bounds.center();
        let top_left = bounds.origin() - center;
        let advance = self.line_advance();
        with_saved(surface, |s| {
            s.translate(center.to_vec2());
            s.rotate(self.rotation);
            s.set_font(&self.font_family, self.font_size);
            s.set_text_baseline(TextBaseline::Top);
            s.set_fill_color(self.style.stroke());
            for (i, line) in self.lines().enumerate() {
                let origin = Point::new(top_left.x, top_left.y + i as f64 * advance);
                s.fill_text(line, origin);
            }
        });
    }

    fn move_offsets(&self, pointer: Point) -> MoveOffsets {
        MoveOffsets::Origin(pointer - self.position)
    }

    fn translate(&mut self, pointer: Point, offsets: &MoveOffsets) {
        translate_origin(&mut self.position, pointer, offsets, "text");
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
