//! A [`Surface`] that records kurbo paths instead of rasterizing.

use crate::display_list::{DisplayList, DrawCommand};
use brushbox_core::shapes::APPROXIMATE_CHAR_WIDTH;
use brushbox_core::{Surface, TextBaseline};
use kurbo::{Affine, Arc, BezPath, Ellipse, Point, Rect, Size, Stroke, Vec2};
use peniko::Color;
use thiserror::Error;

/// Flattening tolerance for curves.
const TOLERANCE: f64 = 0.1;

/// Display-list errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("restore called {0} time(s) without a matching save")]
    UnbalancedRestore(usize),
    #[error("{0} save(s) never restored")]
    UnclosedSave(usize),
}

/// State pushed by `save` besides the transform.
#[derive(Debug, Clone)]
struct PaintState {
    stroke: Color,
    fill: Color,
    line_width: f64,
    dashes: Vec<f64>,
    font_family: String,
    font_size: f64,
    baseline: TextBaseline,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            stroke: Color::from_rgba8(0, 0, 0, 255),
            fill: Color::from_rgba8(0, 0, 0, 255),
            line_width: 1.0,
            dashes: Vec::new(),
            font_family: "sans-serif".to_string(),
            font_size: 10.0,
            baseline: TextBaseline::Alphabetic,
        }
    }
}

/// Records every stroke, fill and text run as a [`DrawCommand`].
///
/// Paths are stored already transformed into surface coordinates. Clearing
/// the whole surface starts a new frame, so the recorded list always holds
/// the latest frame only.
#[derive(Debug)]
pub struct PathSurface {
    size: Size,
    transform: Affine,
    paint: PaintState,
    stack: Vec<(Affine, PaintState)>,
    path: BezPath,
    commands: Vec<DrawCommand>,
    unbalanced_restores: usize,
}

impl PathSurface {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            transform: Affine::IDENTITY,
            paint: PaintState::default(),
            stack: Vec::new(),
            path: BezPath::new(),
            commands: Vec::new(),
            unbalanced_restores: 0,
        }
    }

    /// Current save nesting.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    /// Commands recorded since the last full clear.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Copy of the current frame.
    pub fn snapshot(&self) -> DisplayList {
        DisplayList::new(self.size, self.commands.clone())
    }

    /// Check that every save was restored and no restore was unmatched.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.unbalanced_restores > 0 {
            return Err(RenderError::UnbalancedRestore(self.unbalanced_restores));
        }
        if !self.stack.is_empty() {
            return Err(RenderError::UnclosedSave(self.stack.len()));
        }
        Ok(())
    }

    /// Consume the surface and hand out the recorded frame.
    pub fn finish(self) -> Result<DisplayList, RenderError> {
        self.validate()?;
        Ok(DisplayList::new(self.size, self.commands))
    }

    fn append(&mut self, shape: &impl kurbo::Shape) {
        let mut path = shape.to_path(TOLERANCE);
        path.apply_affine(self.transform);
        self.path.extend(path.elements().iter().copied());
    }
}

impl Surface for PathSurface {
    fn size(&self) -> Size {
        self.size
    }

    fn clear_rect(&mut self, rect: Rect) {
        let rect = self.transform.transform_rect_bbox(rect);
        let full = Rect::from_origin_size(Point::ZERO, self.size);
        if rect.union(full) == rect {
            log::debug!("New frame, dropping {} command(s)", self.commands.len());
            self.commands.clear();
        }
        self.commands.push(DrawCommand::Clear(rect));
    }

    fn save(&mut self) {
        self.stack.push((self.transform, self.paint.clone()));
    }

    fn restore(&mut self) {
        match self.stack.pop() {
            Some((transform, paint)) => {
                self.transform = transform;
                self.paint = paint;
            }
            None => {
                log::warn!("restore without matching save");
                self.unbalanced_restores += 1;
            }
        }
    }

    fn translate(&mut self, offset: Vec2) {
        self.transform *= Affine::translate(offset);
    }

    fn rotate(&mut self, angle: f64) {
        self.transform *= Affine::rotate(angle);
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn move_to(&mut self, point: Point) {
        self.path.move_to(self.transform * point);
    }

    fn line_to(&mut self, point: Point) {
        self.path.line_to(self.transform * point);
    }

    fn close_path(&mut self) {
        self.path.close_path();
    }

    fn rect(&mut self, rect: Rect) {
        self.append(&rect);
    }

    fn ellipse(&mut self, center: Point, radii: Vec2, rotation: f64) {
        self.append(&Ellipse::new(center, radii, rotation));
    }

    fn arc(&mut self, center: Point, radius: f64, start_angle: f64, end_angle: f64) {
        let sweep = end_angle - start_angle;
        self.append(&Arc::new(center, (radius, radius), start_angle, sweep, 0.0));
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.paint.stroke = color;
    }

    fn set_fill_color(&mut self, color: Color) {
        self.paint.fill = color;
    }

    fn set_line_width(&mut self, width: f64) {
        self.paint.line_width = width;
    }

    fn set_line_dash(&mut self, dashes: &[f64]) {
        self.paint.dashes = dashes.to_vec();
    }

    fn stroke(&mut self) {
        let mut style = Stroke::new(self.paint.line_width);
        if !self.paint.dashes.is_empty() {
            style = style.with_dashes(0.0, self.paint.dashes.iter().copied());
        }
        self.commands.push(DrawCommand::Stroke {
            path: self.path.clone(),
            color: self.paint.stroke,
            style,
        });
    }

    fn fill(&mut self) {
        self.commands.push(DrawCommand::Fill {
            path: self.path.clone(),
            color: self.paint.fill,
        });
    }

    fn set_font(&mut self, family: &str, size: f64) {
        self.paint.font_family = family.to_string();
        self.paint.font_size = size;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.paint.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, origin: Point) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            transform: self.transform * Affine::translate(origin.to_vec2()),
            font_family: self.paint.font_family.clone(),
            font_size: self.paint.font_size,
            baseline: self.paint.baseline,
            color: self.paint.fill,
        });
    }

    /// Fixed advance per character; there is no font backend.
    fn measure_text(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.paint.font_size * APPROXIMATE_CHAR_WIDTH
    }
}
