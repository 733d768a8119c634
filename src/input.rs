//! Input model: activity modes, modifier keys, pointer targets and gestures.
//!
//! `Mode` is the high-level activity state the host sees. `Gesture` is the
//! pointer-down to pointer-up interaction currently being tracked, carrying
//! whatever context its move events need.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::hit::Handle;
use crate::resize::DragOffset;
use crate::shape::ShapeId;

/// Activity mode governing how pointer events are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Idle: the next pointer-down creates or selects.
    #[default]
    Create,
    /// A new shape is being sized out.
    Drag,
    /// An existing shape is the target of styling, resizing and deletion.
    Selected,
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Whether creation should be constrained to equal axis deltas.
    #[must_use]
    pub fn constrain(self) -> bool {
        self.shift
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

impl Button {
    /// Map a DOM `MouseEvent.button` value.
    #[must_use]
    pub fn from_dom(button: i16) -> Self {
        match button {
            1 => Self::Middle,
            2 => Self::Secondary,
            _ => Self::Primary,
        }
    }
}

/// A keyboard key as reported by the browser (e.g. `"Enter"`, `"Backspace"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    /// Confirms the current selection.
    #[must_use]
    pub fn is_confirm(&self) -> bool {
        self.0 == "Enter"
    }

    /// Deletes the active shape.
    #[must_use]
    pub fn is_delete(&self) -> bool {
        matches!(self.0.as_str(), "Backspace" | "Delete")
    }
}

/// What a pointer-down landed on, as classified by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerTarget {
    /// Inside the drawing surface. Carries the target element's shape-id
    /// attribute, if it has one.
    Surface(Option<String>),
    /// The selection box around the active shape.
    SelectionBox,
    /// One of the overlay handles.
    Handle(Handle),
    /// The text-edit field bound to the active text shape.
    TextEditor,
    /// Anywhere else on the page.
    Outside,
}

/// Persistent UI state visible to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub mode: Mode,
    /// The id of the active shape, if any.
    pub active_id: Option<ShapeId>,
}

/// The pointer gesture currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    /// No button held.
    #[default]
    Idle,
    /// Sizing out a freshly created shape.
    Creating {
        id: ShapeId,
    },
    /// Dragging a resize or endpoint handle.
    Resizing {
        id: ShapeId,
        handle: Handle,
    },
    /// Dragging the whole shape; `offset` is anchor minus pointer at grab time.
    Moving {
        id: ShapeId,
        offset: DragOffset,
    },
}
