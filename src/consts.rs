//! Shared numeric constants for the annotate crate.

use std::f64::consts::PI;

// ── Selection overlay ───────────────────────────────────────────

/// Side length of a square resize/endpoint handle, in page pixels.
pub const HANDLE_SIZE_PX: f64 = 10.0;

/// Vertical gap between a text anchor and its editor, in page pixels.
pub const TEXT_EDITOR_OFFSET_PX: f64 = 20.0;

// ── Rendering ───────────────────────────────────────────────────

/// Arrowhead length in local units.
pub const ARROW_SIZE: f64 = 10.0;

/// Arrowhead half-angle in radians (30°).
pub const ARROW_ANGLE: f64 = PI / 6.0;

// ── Tool defaults ───────────────────────────────────────────────

/// Stroke colour for new shapes.
pub const DEFAULT_COLOR: &str = "red";

/// Stroke width for new shapes.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Font size for new text shapes.
pub const DEFAULT_FONT_SIZE: f64 = 20.0;

/// Content of a freshly created text shape.
pub const DEFAULT_TEXT: &str = "default text";
