//! Error types shared across the core crate.

use crate::selection::HandleKind;
use crate::shapes::ShapeId;
use thiserror::Error;

/// Errors raised by scene, tool and configuration operations.
///
/// None of these reach the pointer stream: the scene and the tools log
/// them and carry on with the next event.
#[derive(Debug, Error)]
pub enum BrushboxError {
    #[error("No drawing surface attached")]
    SurfaceUnavailable,
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
    #[error("Handle {handle:?} does not apply to a {shape} shape")]
    UnsupportedHandle {
        handle: HandleKind,
        shape: &'static str,
    },
    #[error("Shape not found: {0}")]
    ShapeNotFound(ShapeId),
    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, BrushboxError>;
