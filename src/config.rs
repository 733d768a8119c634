//! Tool settings and host configuration parsed from JSON.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DEFAULT_COLOR, DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH, DEFAULT_TEXT, HANDLE_SIZE_PX, TEXT_EDITOR_OFFSET_PX,
};
use crate::error::AnnotateError;
use crate::shape::ShapeKind;

/// The "active tool": what the next created shape looks like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolSettings {
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub color: String,
    pub stroke_width: f64,
    pub font_size: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Rect,
            color: DEFAULT_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl ToolSettings {
    /// Reject non-finite or non-positive sizes.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotateError::InvalidStyle`] naming the first bad field.
    pub fn validate(&self) -> Result<(), AnnotateError> {
        positive("stroke width", self.stroke_width)?;
        positive("font size", self.font_size)?;
        Ok(())
    }
}

/// Host-supplied configuration. Every field is optional in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnnotateConfig {
    /// Initial tool settings.
    pub tool: ToolSettings,
    /// Content of a freshly created text shape.
    pub default_text: String,
    /// Gap between a text anchor and its editor, in page pixels.
    pub text_editor_offset_px: f64,
    /// Side length of overlay handles, in page pixels.
    pub handle_size_px: f64,
}

impl Default for AnnotateConfig {
    fn default() -> Self {
        Self {
            tool: ToolSettings::default(),
            default_text: DEFAULT_TEXT.to_string(),
            text_editor_offset_px: TEXT_EDITOR_OFFSET_PX,
            handle_size_px: HANDLE_SIZE_PX,
        }
    }
}

impl AnnotateConfig {
    /// Parse and validate a JSON config object.
    ///
    /// # Errors
    ///
    /// Returns [`AnnotateError::Config`] for malformed JSON or unknown shape
    /// kinds, and [`AnnotateError::InvalidStyle`] for bad sizes.
    pub fn from_json(raw: &str) -> Result<Self, AnnotateError> {
        let config: Self = serde_json::from_str(raw)?;
        config.tool.validate()?;
        positive("handle size", config.handle_size_px)?;
        if !config.text_editor_offset_px.is_finite() {
            return Err(AnnotateError::InvalidStyle {
                field: "text editor offset",
                value: config.text_editor_offset_px,
            });
        }
        Ok(config)
    }
}

/// Pass through `value` if it is finite and greater than zero.
///
/// # Errors
///
/// Returns [`AnnotateError::InvalidStyle`] otherwise.
pub fn positive(field: &'static str, value: f64) -> Result<f64, AnnotateError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AnnotateError::InvalidStyle { field, value })
    }
}
