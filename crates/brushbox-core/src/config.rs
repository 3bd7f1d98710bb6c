//! Editor configuration.

use crate::error::Result;
use crate::selection::HandleMetrics;
use crate::shapes::{SerializableColor, ShapeStyle};
use serde::{Deserialize, Serialize};

/// Colors used for the selection overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionColors {
    /// Border around selected shapes and the multi-selection box.
    pub border: SerializableColor,
    /// Fill of resize and rotation handles.
    pub handle_fill: SerializableColor,
    /// Translucent fill of the rubber-band rectangle.
    pub marquee_fill: SerializableColor,
}

impl Default for SelectionColors {
    fn default() -> Self {
        Self {
            border: SerializableColor::new(59, 130, 246, 255),
            handle_fill: SerializableColor::white(),
            marquee_fill: SerializableColor::new(59, 130, 246, 25),
        }
    }
}

/// Defaults applied to text created with the text tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDefaults {
    pub font_family: String,
    pub font_size: f64,
    /// Committed text is never narrower than this.
    pub min_width: f64,
    /// Line advance as a multiple of the font size.
    pub line_height: f64,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            font_size: 24.0,
            min_width: 16.0,
            line_height: 1.0,
        }
    }
}

/// Everything a [`Scene`](crate::scene::Scene) can be tuned with.
///
/// Every field has a default, so a partial JSON document is valid.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub handles: HandleMetrics,
    /// Style given to newly drawn shapes.
    pub style: ShapeStyle,
    pub selection: SelectionColors,
    pub text: TextDefaults,
}

impl EditorConfig {
    /// Parse a configuration from JSON. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json)?;
        log::debug!("Loaded editor config: {config:?}");
        Ok(config)
    }

    /// Serialize the configuration to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
