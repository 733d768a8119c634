//! Shape model: annotation shapes, their kind capabilities, and the ordered store.
//!
//! A shape is two anchors kept in two frames (local and page) plus style. The
//! anchors are NOT normalised: either one may hold the minimum on either axis,
//! depending on how the shape was drawn and resized since. Anything that needs
//! a box derives it through [`Bounds::from_corners`].
//!
//! `ShapeStore` owns every live shape together with the creation order used
//! for z-order and undo. Mutations replace a whole shape at a time.

#[cfg(test)]
#[path = "shape_test.rs"]
mod shape_test;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::consts::{DEFAULT_COLOR, DEFAULT_FONT_SIZE, DEFAULT_STROKE_WIDTH, DEFAULT_TEXT};
use crate::coords::{Point, PointerPos};
use crate::error::AnnotateError;

/// Unique identifier for a shape.
pub type ShapeId = Uuid;

/// The kind of an annotation shape. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Straight segment between the two anchors.
    Line,
    /// Segment with an arrowhead at the second anchor.
    Arrow,
    /// Axis-aligned rectangle spanning both anchors.
    Rect,
    /// Ellipse inscribed in the anchors' bounding box.
    Ellipse,
    /// Text placed at the first anchor.
    Text,
}

/// How the ends of a stroked segment are decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointStyle {
    /// Not a segment.
    None,
    /// Bare segment ends.
    Plain,
    /// Arrowhead at the second anchor.
    Arrowhead,
}

/// What the overlay and renderer may do with a given kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Exposes the eight directional resize handles.
    pub has_resize_handles: bool,
    /// Exposes the two explicit endpoint handles.
    pub has_endpoint_handles: bool,
    pub endpoint_style: EndpointStyle,
    /// Draws `text_content` instead of a stroke.
    pub renders_text: bool,
}

impl ShapeKind {
    pub const ALL: [Self; 5] = [Self::Line, Self::Arrow, Self::Rect, Self::Ellipse, Self::Text];

    /// Capability table consulted by the selection overlay and the renderer.
    #[must_use]
    pub fn capabilities(self) -> Capabilities {
        match self {
            Self::Line => Capabilities {
                has_resize_handles: false,
                has_endpoint_handles: true,
                endpoint_style: EndpointStyle::Plain,
                renders_text: false,
            },
            Self::Arrow => Capabilities {
                has_resize_handles: true,
                has_endpoint_handles: false,
                endpoint_style: EndpointStyle::Arrowhead,
                renders_text: false,
            },
            Self::Rect | Self::Ellipse => Capabilities {
                has_resize_handles: true,
                has_endpoint_handles: false,
                endpoint_style: EndpointStyle::None,
                renders_text: false,
            },
            Self::Text => Capabilities {
                has_resize_handles: false,
                has_endpoint_handles: false,
                endpoint_style: EndpointStyle::None,
                renders_text: true,
            },
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Arrow => "arrow",
            Self::Rect => "rect",
            Self::Ellipse => "ellipse",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = AnnotateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| AnnotateError::UnknownShapeKind(s.to_string()))
    }
}

/// One of the two stored anchors of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorSlot {
    /// `(x1, y1)` / `(page_x1, page_y1)`.
    First,
    /// `(x2, y2)` / `(page_x2, page_y2)`.
    Second,
}

impl AnchorSlot {
    #[must_use]
    pub fn other(self) -> Self {
        match self {
            Self::First => Self::Second,
            Self::Second => Self::First,
        }
    }
}

/// A coordinate axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Axis-aligned box derived from two unordered corners.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Build a box from two corners in any order.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        Self { x, y, width: (a.x - b.x).abs(), height: (a.y - b.y).abs() }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// An annotation shape as stored and as handed to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub id: ShapeId,
    #[serde(rename = "type")]
    pub kind: ShapeKind,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub page_x1: f64,
    pub page_y1: f64,
    pub page_x2: f64,
    pub page_y2: f64,
    pub color: String,
    pub stroke_width: f64,
    pub font_size: f64,
    pub text_content: String,
}

impl Shape {
    /// A zero-size shape with both anchors at `at`, in default style.
    #[must_use]
    pub fn new(id: ShapeId, kind: ShapeKind, at: PointerPos) -> Self {
        Self {
            id,
            kind,
            x1: at.x,
            y1: at.y,
            x2: at.x,
            y2: at.y,
            page_x1: at.page_x,
            page_y1: at.page_y,
            page_x2: at.page_x,
            page_y2: at.page_y,
            color: DEFAULT_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
            text_content: DEFAULT_TEXT.to_string(),
        }
    }

    /// Local-frame coordinate of `slot` on `axis`.
    #[must_use]
    pub fn coord(&self, slot: AnchorSlot, axis: Axis) -> f64 {
        match (slot, axis) {
            (AnchorSlot::First, Axis::X) => self.x1,
            (AnchorSlot::First, Axis::Y) => self.y1,
            (AnchorSlot::Second, Axis::X) => self.x2,
            (AnchorSlot::Second, Axis::Y) => self.y2,
        }
    }

    /// Set one axis of one anchor in both frames together.
    pub fn set_coord(&mut self, slot: AnchorSlot, axis: Axis, local: f64, page: f64) {
        let (l, p) = match (slot, axis) {
            (AnchorSlot::First, Axis::X) => (&mut self.x1, &mut self.page_x1),
            (AnchorSlot::First, Axis::Y) => (&mut self.y1, &mut self.page_y1),
            (AnchorSlot::Second, Axis::X) => (&mut self.x2, &mut self.page_x2),
            (AnchorSlot::Second, Axis::Y) => (&mut self.y2, &mut self.page_y2),
        };
        *l = local;
        *p = page;
    }

    /// Move one anchor, both axes and both frames, to `pos`.
    pub fn set_anchor(&mut self, slot: AnchorSlot, pos: PointerPos) {
        self.set_coord(slot, Axis::X, pos.x, pos.page_x);
        self.set_coord(slot, Axis::Y, pos.y, pos.page_y);
    }

    /// Box spanned by the anchors in the local frame.
    #[must_use]
    pub fn local_bounds(&self) -> Bounds {
        Bounds::from_corners(Point::new(self.x1, self.y1), Point::new(self.x2, self.y2))
    }

    /// Box spanned by the anchors in the page frame.
    #[must_use]
    pub fn page_bounds(&self) -> Bounds {
        Bounds::from_corners(Point::new(self.page_x1, self.page_y1), Point::new(self.page_x2, self.page_y2))
    }
}

/// Sparse style/content update for a shape. Only present fields are applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialShape {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
}

impl PartialShape {
    /// Produce a patched copy of `shape`.
    #[must_use]
    pub fn applied_to(&self, shape: &Shape) -> Shape {
        let mut next = shape.clone();
        if let Some(ref color) = self.color {
            next.color.clone_from(color);
        }
        if let Some(w) = self.stroke_width {
            next.stroke_width = w;
        }
        if let Some(s) = self.font_size {
            next.font_size = s;
        }
        if let Some(ref text) = self.text_content {
            next.text_content.clone_from(text);
        }
        next
    }
}

/// In-memory store of shapes plus their creation order.
///
/// Every id in the order list has an entry in the map and vice versa.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: HashMap<ShapeId, Shape>,
    order: Vec<ShapeId>,
}

impl ShapeStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new shape on top of the creation order. A shape whose id is
    /// already present replaces the stored one and keeps its position.
    pub fn insert(&mut self, shape: Shape) {
        if self.shapes.insert(shape.id, shape.clone()).is_none() {
            self.order.push(shape.id);
        }
    }

    /// Replace an existing shape wholesale. Returns false if the id is unknown.
    pub fn replace(&mut self, shape: Shape) -> bool {
        match self.shapes.get_mut(&shape.id) {
            Some(slot) => {
                *slot = shape;
                true
            }
            None => false,
        }
    }

    /// Apply a sparse update as a full replacement. Returns false if the id is unknown.
    pub fn apply_partial(&mut self, id: &ShapeId, partial: &PartialShape) -> bool {
        let Some(current) = self.shapes.get(id) else {
            return false;
        };
        let next = partial.applied_to(current);
        self.replace(next)
    }

    /// Remove a shape by id, returning it if it was present.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let shape = self.shapes.remove(id)?;
        self.order.retain(|o| o != id);
        Some(shape)
    }

    /// Remove the most recently created shape.
    pub fn pop_last(&mut self) -> Option<Shape> {
        let id = self.order.pop()?;
        self.shapes.remove(&id)
    }

    /// Return a reference to a shape by id.
    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.shapes.contains_key(id)
    }

    /// Ids in creation order, oldest first.
    #[must_use]
    pub fn order(&self) -> &[ShapeId] {
        &self.order
    }

    /// Shapes in creation order, oldest (bottom) first.
    pub fn ordered(&self) -> impl Iterator<Item = &Shape> {
        self.order.iter().filter_map(|id| self.shapes.get(id))
    }

    /// Number of shapes currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Returns `true` if the store contains no shapes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
