//! Undo and delete.
//!
//! Undo is a stack over creation order, not an action log: it removes the
//! newest shape, and edits made to existing shapes are not reverted.

#[cfg(test)]
#[path = "history_test.rs"]
mod history_test;

use tracing::debug;

use crate::input::{Mode, UiState};
use crate::shape::{Shape, ShapeId, ShapeStore};

/// Remove the most recently created shape. No-op on an empty store.
///
/// If the removed shape was active, the selection is dropped with it.
pub fn undo(store: &mut ShapeStore, ui: &mut UiState) -> Option<Shape> {
    let removed = store.pop_last()?;
    if ui.active_id == Some(removed.id) {
        *ui = UiState::default();
    }
    debug!(id = %removed.id, kind = ?removed.kind, remaining = store.len(), "undo");
    Some(removed)
}

/// Remove `id` and return to [`Mode::Create`] with nothing active.
///
/// The mode reset happens even when `id` is unknown.
pub fn delete_shape(store: &mut ShapeStore, ui: &mut UiState, id: &ShapeId) -> Option<Shape> {
    ui.active_id = None;
    ui.mode = Mode::Create;
    let removed = store.remove(id);
    debug!(%id, found = removed.is_some(), remaining = store.len(), "delete shape");
    removed
}
