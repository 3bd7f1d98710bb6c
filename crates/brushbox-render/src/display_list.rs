//! Recorded drawing commands.

use brushbox_core::TextBaseline;
use kurbo::{Affine, BezPath, Rect, Size, Stroke};
use peniko::Color;

/// One painted primitive, in surface coordinates.
#[derive(Debug, Clone)]
pub enum DrawCommand {
    /// Erase a region.
    Clear(Rect),
    Fill {
        path: BezPath,
        color: Color,
    },
    Stroke {
        path: BezPath,
        color: Color,
        style: Stroke,
    },
    Text {
        text: String,
        /// Places the text anchor (the local origin) on the surface.
        transform: Affine,
        font_family: String,
        font_size: f64,
        baseline: TextBaseline,
        color: Color,
    },
}

/// The commands of one frame, in paint order.
#[derive(Debug, Clone)]
pub struct DisplayList {
    size: Size,
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    pub(crate) fn new(size: Size, commands: Vec<DrawCommand>) -> Self {
        Self { size, commands }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Filled paths with their colors.
    pub fn fills(&self) -> impl Iterator<Item = (&BezPath, Color)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Fill { path, color } => Some((path, *color)),
            _ => None,
        })
    }

    /// Stroked paths with their colors and stroke styles.
    pub fn strokes(&self) -> impl Iterator<Item = (&BezPath, Color, &Stroke)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Stroke { path, color, style } => Some((path, *color, style)),
            _ => None,
        })
    }

    /// Text runs with their placement.
    pub fn texts(&self) -> impl Iterator<Item = (&str, Affine)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, transform, .. } => Some((text.as_str(), *transform)),
            _ => None,
        })
    }
}
