//! Resize and move: turns a handle drag or body drag into an updated shape.
//!
//! Stored anchors are unordered, so a directional handle never names an
//! anchor directly. Each call asks [`extreme_anchor`] which anchor currently
//! holds the extreme being dragged on each axis and moves only that one. The
//! question is re-asked on every call: dragging a west handle past the east
//! edge makes the dragged anchor the eastern one, and the next call resolves
//! "west" to the other anchor.
//!
//! Every function here is pure and returns a fresh `Shape`.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::coords::PointerPos;
use crate::hit::{EdgeEnd, Handle, ResizeAnchor};
use crate::shape::{AnchorSlot, Axis, Shape};

/// Which end of an axis a handle drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extreme {
    /// Left on x, top on y.
    Min,
    /// Right on x, bottom on y.
    Max,
}

impl ResizeAnchor {
    /// The extremes this handle drags on x and y; `None` leaves the axis alone.
    #[must_use]
    pub fn extremes(self) -> (Option<Extreme>, Option<Extreme>) {
        use Extreme::{Max, Min};
        match self {
            Self::N => (None, Some(Min)),
            Self::S => (None, Some(Max)),
            Self::E => (Some(Max), None),
            Self::W => (Some(Min), None),
            Self::Nw => (Some(Min), Some(Min)),
            Self::Ne => (Some(Max), Some(Min)),
            Self::Sw => (Some(Min), Some(Max)),
            Self::Se => (Some(Max), Some(Max)),
        }
    }
}

/// Which stored anchor currently holds `extreme` on `axis`.
///
/// Ties resolve to the second anchor.
#[must_use]
pub fn extreme_anchor(shape: &Shape, axis: Axis, extreme: Extreme) -> AnchorSlot {
    let first = shape.coord(AnchorSlot::First, axis);
    let second = shape.coord(AnchorSlot::Second, axis);
    let first_wins = match extreme {
        Extreme::Min => first < second,
        Extreme::Max => first > second,
    };
    if first_wins { AnchorSlot::First } else { AnchorSlot::Second }
}

/// Whether `handle` is offered for shapes of this kind.
#[must_use]
pub fn handle_applies(shape: &Shape, handle: Handle) -> bool {
    let caps = shape.kind.capabilities();
    match handle {
        Handle::Resize(_) => caps.has_resize_handles,
        Handle::Endpoint(_) => caps.has_endpoint_handles,
    }
}

/// Drag `handle` of `shape` to `pos`.
///
/// Handles that do not apply to the shape's kind leave it unchanged.
#[must_use]
pub fn adjust(shape: &Shape, handle: Handle, pos: PointerPos) -> Shape {
    let mut next = shape.clone();
    if !handle_applies(shape, handle) {
        return next;
    }
    match handle {
        Handle::Resize(anchor) => {
            let (x_extreme, y_extreme) = anchor.extremes();
            if let Some(extreme) = x_extreme {
                let slot = extreme_anchor(shape, Axis::X, extreme);
                next.set_coord(slot, Axis::X, pos.x, pos.page_x);
            }
            if let Some(extreme) = y_extreme {
                let slot = extreme_anchor(shape, Axis::Y, extreme);
                next.set_coord(slot, Axis::Y, pos.y, pos.page_y);
            }
        }
        Handle::Endpoint(EdgeEnd::Start) => next.set_anchor(AnchorSlot::First, pos),
        Handle::Endpoint(EdgeEnd::End) => next.set_anchor(AnchorSlot::Second, pos),
    }
    next
}

/// Anchor-minus-pointer deltas captured when a move gesture starts.
///
/// Measured in the local frame and reused for the page frame; the two frames
/// differ only by a translation, so the deltas are identical.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragOffset {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl DragOffset {
    /// Capture the offset between `shape`'s anchors and the grab point.
    #[must_use]
    pub fn capture(shape: &Shape, grab: PointerPos) -> Self {
        Self {
            x1: shape.x1 - grab.x,
            y1: shape.y1 - grab.y,
            x2: shape.x2 - grab.x,
            y2: shape.y2 - grab.y,
        }
    }
}

/// Place `shape` so the originally grabbed point sits under `pos`.
#[must_use]
pub fn move_to(shape: &Shape, offset: DragOffset, pos: PointerPos) -> Shape {
    Shape {
        x1: pos.x + offset.x1,
        y1: pos.y + offset.y1,
        x2: pos.x + offset.x2,
        y2: pos.y + offset.y2,
        page_x1: pos.page_x + offset.x1,
        page_y1: pos.page_y + offset.y1,
        page_x2: pos.page_x + offset.x2,
        page_y2: pos.page_y + offset.y2,
        ..shape.clone()
    }
}
