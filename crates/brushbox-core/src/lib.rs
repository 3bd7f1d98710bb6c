//! Brushbox Core Library
//!
//! Platform-agnostic shape model, geometry and gesture tools for the
//! Brushbox whiteboard. Drawing goes through the [`Surface`] trait, so the
//! core never depends on a particular renderer.

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod scene;
pub mod selection;
pub mod shapes;
pub mod surface;
pub mod tools;

pub use config::{EditorConfig, SelectionColors, TextDefaults};
pub use error::{BrushboxError, Result};
pub use input::{Modifiers, PointerEvent, PointerPhase};
pub use scene::Scene;
pub use selection::{Handle, HandleKind, HandleMetrics, SelectionFrame};
pub use shapes::{Shape, ShapeId, ShapeStyle, ShapeTrait};
pub use surface::{Surface, TextBaseline, TextEditHost};
pub use tools::{Tool, ToolKind};
