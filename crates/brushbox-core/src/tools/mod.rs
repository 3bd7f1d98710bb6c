//! Tool system for the whiteboard.
//!
//! Exactly one [`Tool`] is active on a [`Scene`] at a time. The scene feeds
//! it the pointer events of each captured gesture and redraws after every
//! event, asking the tool for its overlay on top of the shapes.

mod draw;
mod freehand;
mod select;
mod text;

pub use draw::{DragShape, DragShapeTool};
pub use freehand::FreehandTool;
pub use select::{SelectState, SelectTool};
pub use text::TextTool;

use crate::error::BrushboxError;
use crate::input::PointerEvent;
use crate::scene::Scene;
use crate::surface::Surface;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Line,
    Freehand,
    Text,
}

impl ToolKind {
    pub const ALL: [ToolKind; 6] = [
        ToolKind::Select,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Line,
        ToolKind::Freehand,
        ToolKind::Text,
    ];

    /// Canonical name, as accepted by [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Select => "selection",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Ellipse => "ellipse",
            ToolKind::Line => "line",
            ToolKind::Freehand => "freedraw",
            ToolKind::Text => "text",
        }
    }

    /// Build a fresh, idle tool of this kind.
    pub fn create(self) -> Box<dyn Tool> {
        match self {
            ToolKind::Select => Box::new(SelectTool::new()),
            ToolKind::Rectangle => Box::new(DragShapeTool::new(DragShape::Rectangle)),
            ToolKind::Ellipse => Box::new(DragShapeTool::new(DragShape::Ellipse)),
            ToolKind::Line => Box::new(DragShapeTool::new(DragShape::Line)),
            ToolKind::Freehand => Box::new(FreehandTool::new()),
            ToolKind::Text => Box::new(TextTool::new()),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = BrushboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "selection" | "select" => Ok(ToolKind::Select),
            "rectangle" => Ok(ToolKind::Rectangle),
            "ellipse" => Ok(ToolKind::Ellipse),
            "line" => Ok(ToolKind::Line),
            "freedraw" | "freehand" => Ok(ToolKind::Freehand),
            "text" => Ok(ToolKind::Text),
            _ => Err(BrushboxError::UnknownTool(s.to_string())),
        }
    }
}

/// A gesture handler.
///
/// The scene calls `pointer_down` when a gesture starts, `pointer_move`
/// for each sample while it lasts, and `pointer_up` exactly once when it
/// ends. Per-gesture state lives in the tool between those calls. A tool
/// may replace itself by calling [`Scene::set_tool`] from any handler.
pub trait Tool {
    fn kind(&self) -> ToolKind;

    fn pointer_down(&mut self, scene: &mut Scene, event: &PointerEvent);

    fn pointer_move(&mut self, _scene: &mut Scene, _event: &PointerEvent) {}

    fn pointer_up(&mut self, scene: &mut Scene, event: &PointerEvent);

    /// Draw transient feedback (previews, selection) above the shapes.
    fn draw_overlay(&self, _scene: &Scene, _surface: &mut dyn Surface) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names_round_trip() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.name().parse::<ToolKind>().unwrap(), kind);
            assert_eq!(kind.create().kind(), kind);
        }
    }

    #[test]
    fn test_tool_aliases() {
        assert_eq!("select".parse::<ToolKind>().unwrap(), ToolKind::Select);
        assert_eq!("Freehand".parse::<ToolKind>().unwrap(), ToolKind::Freehand);
        assert_eq!(ToolKind::default(), ToolKind::Select);
    }

    #[test]
    fn test_unknown_tool() {
        let err = "lasso".parse::<ToolKind>().unwrap_err();
        assert!(matches!(err, BrushboxError::UnknownTool(name) if name == "lasso"));
    }
}
