//! Hit-testing: handle identifiers and shape-id attribute lookup.
//!
//! Shapes are hit by the element the pointer landed on, not by geometry: the
//! host reads the target element's shape-id attribute and the engine matches
//! it against the store. Overlay handles are addressed by their DOM ids.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use uuid::Uuid;

use crate::shape::{ShapeId, ShapeStore};

/// DOM id of the whole-shape move box.
pub const SELECTION_BOX_ID: &str = "selection-box";

/// Anchor position for resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAnchor {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl ResizeAnchor {
    pub const ALL: [Self; 8] = [Self::Nw, Self::N, Self::Ne, Self::W, Self::E, Self::Sw, Self::S, Self::Se];

    /// CSS cursor shown while hovering the handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Nw | Self::Se => "nwse-resize",
            Self::Ne | Self::Sw => "nesw-resize",
            Self::N | Self::S => "ns-resize",
            Self::E | Self::W => "ew-resize",
        }
    }
}

/// Which end of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeEnd {
    /// The first anchor, `(x1, y1)`.
    Start,
    /// The second anchor, `(x2, y2)`.
    End,
}

/// A draggable overlay handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    Resize(ResizeAnchor),
    Endpoint(EdgeEnd),
}

impl Handle {
    /// DOM id the host gives this handle's element.
    #[must_use]
    pub fn dom_id(self) -> &'static str {
        match self {
            Self::Resize(ResizeAnchor::N) => "annotation-n",
            Self::Resize(ResizeAnchor::Ne) => "annotation-ne",
            Self::Resize(ResizeAnchor::E) => "annotation-e",
            Self::Resize(ResizeAnchor::Se) => "annotation-se",
            Self::Resize(ResizeAnchor::S) => "annotation-s",
            Self::Resize(ResizeAnchor::Sw) => "annotation-sw",
            Self::Resize(ResizeAnchor::W) => "annotation-w",
            Self::Resize(ResizeAnchor::Nw) => "annotation-nw",
            Self::Endpoint(EdgeEnd::Start) => "annotation-x1-y1",
            Self::Endpoint(EdgeEnd::End) => "annotation-x2-y2",
        }
    }

    /// Inverse of [`Handle::dom_id`].
    #[must_use]
    pub fn from_dom_id(id: &str) -> Option<Self> {
        ResizeAnchor::ALL
            .into_iter()
            .map(Self::Resize)
            .chain([Self::Endpoint(EdgeEnd::Start), Self::Endpoint(EdgeEnd::End)])
            .find(|h| h.dom_id() == id)
    }

    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Resize(anchor) => anchor.cursor(),
            Self::Endpoint(_) => "move",
        }
    }
}

/// Match a pointer target's shape-id attribute against the store.
///
/// A missing, malformed or unknown attribute means "not on a shape".
#[must_use]
pub fn shape_at(attr: Option<&str>, store: &ShapeStore) -> Option<ShapeId> {
    let Ok(id) = Uuid::parse_str(attr?) else {
        return None;
    };
    store.contains(&id).then_some(id)
}
