//! Interactive shape-editing engine for annotating a fixed background image.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! annotation model and the pointer-driven editing state machine: creating
//! shapes by dragging, selecting them, resizing from any handle regardless of
//! the direction they were drawn in, moving them while preserving the grab
//! point, restyling, undo and delete. The host layer only wires DOM events to
//! the engine and draws whatever [`scene`] describes.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] state machine |
//! | [`shape`] | Shape model, kind capabilities and the ordered shape store |
//! | [`coords`] | Local/page coordinate frames and the pointer tracker |
//! | [`pointer`] | Process-wide pointer feed with explicit subscriptions |
//! | [`input`] | Modes, modifiers, keys, pointer targets and gestures |
//! | [`hit`] | Handle identifiers and shape-id hit-testing |
//! | [`resize`] | Extreme-anchor resolution, handle resize and move |
//! | [`constrain`] | Equal-axis constraint for modifier-held creation |
//! | [`overlay`] | Selection overlay geometry and handle placement |
//! | [`history`] | Undo and delete over the shape store |
//! | [`scene`] | Render list of primitives in creation order |
//! | [`paint`] | Canvas2D painter and the export rasterizer seam |
//! | [`config`] | Tool settings and host configuration |
//! | [`consts`] | Shared numeric constants |
//! | [`error`] | Crate error type |

pub mod config;
pub mod consts;
pub mod constrain;
pub mod coords;
pub mod engine;
pub mod error;
pub mod hit;
pub mod history;
pub mod input;
pub mod overlay;
pub mod paint;
pub mod pointer;
pub mod resize;
pub mod scene;
pub mod shape;
