//! Selection overlay: the move box, handles and text editor around the active shape.
//!
//! Everything here is a pure function of the UI state and the store. Overlay
//! elements live outside the drawing surface, so all geometry is in the page
//! frame. Handle gestures are routed back into the engine by the host via
//! [`crate::input::PointerTarget`].

#[cfg(test)]
#[path = "overlay_test.rs"]
mod overlay_test;

use crate::config::AnnotateConfig;
use crate::coords::Point;
use crate::hit::{EdgeEnd, Handle, ResizeAnchor};
use crate::input::{Mode, UiState};
use crate::shape::{Bounds, Shape, ShapeId, ShapeStore};

/// A handle and the page-frame square it occupies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandlePlacement {
    pub handle: Handle,
    pub rect: Bounds,
    pub cursor: &'static str,
}

/// Everything the host draws while a shape is selected.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionOverlay {
    pub shape_id: ShapeId,
    /// Move box, derived from the page anchors' min/max.
    pub bounds: Bounds,
    /// Cursor over the move box.
    pub box_cursor: &'static str,
    pub handles: Vec<HandlePlacement>,
    /// Top-left of the text editor, for text shapes only.
    pub text_editor: Option<Point>,
}

/// The overlay for the current state, or `None` when nothing is selected.
#[must_use]
pub fn selection_overlay(ui: &UiState, store: &ShapeStore, config: &AnnotateConfig) -> Option<SelectionOverlay> {
    if ui.mode != Mode::Selected {
        return None;
    }
    let shape = store.get(&ui.active_id?)?;
    let bounds = shape.page_bounds();
    let caps = shape.kind.capabilities();
    let size = config.handle_size_px;

    let mut handles = Vec::new();
    if caps.has_resize_handles {
        handles.extend(
            ResizeAnchor::ALL
                .into_iter()
                .map(|anchor| placement(Handle::Resize(anchor), anchor_point(&bounds, anchor), size)),
        );
    }
    if caps.has_endpoint_handles {
        handles.push(placement(
            Handle::Endpoint(EdgeEnd::Start),
            Point::new(shape.page_x1, shape.page_y1),
            size,
        ));
        handles.push(placement(
            Handle::Endpoint(EdgeEnd::End),
            Point::new(shape.page_x2, shape.page_y2),
            size,
        ));
    }

    let text_editor = caps.renders_text.then(|| text_editor_origin(shape, config));

    Some(SelectionOverlay { shape_id: shape.id, bounds, box_cursor: "move", handles, text_editor })
}

fn text_editor_origin(shape: &Shape, config: &AnnotateConfig) -> Point {
    Point::new(shape.page_x1, shape.page_y1 + config.text_editor_offset_px)
}

fn placement(handle: Handle, center: Point, size: f64) -> HandlePlacement {
    let half = size / 2.0;
    HandlePlacement {
        handle,
        rect: Bounds { x: center.x - half, y: center.y - half, width: size, height: size },
        cursor: handle.cursor(),
    }
}

/// Page-frame point on the box edge where `anchor`'s handle is centred.
fn anchor_point(b: &Bounds, anchor: ResizeAnchor) -> Point {
    let c = b.center();
    match anchor {
        ResizeAnchor::Nw => Point::new(b.x, b.y),
        ResizeAnchor::N => Point::new(c.x, b.y),
        ResizeAnchor::Ne => Point::new(b.right(), b.y),
        ResizeAnchor::W => Point::new(b.x, c.y),
        ResizeAnchor::E => Point::new(b.right(), c.y),
        ResizeAnchor::Sw => Point::new(b.x, b.bottom()),
        ResizeAnchor::S => Point::new(c.x, b.bottom()),
        ResizeAnchor::Se => Point::new(b.right(), b.bottom()),
    }
}
