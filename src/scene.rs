//! Render list: one primitive per shape, in creation order.
//!
//! Primitives carry geometry already resolved from the unordered anchors, so
//! a renderer never has to know which anchor is which corner. Later shapes
//! come later in the list and draw on top.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::consts::{ARROW_ANGLE, ARROW_SIZE};
use crate::coords::Point;
use crate::input::{Mode, UiState};
use crate::shape::{Bounds, EndpointStyle, Shape, ShapeId, ShapeKind, ShapeStore};

/// Resolved drawing geometry for one shape, in the local frame.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Line {
        from: Point,
        to: Point,
    },
    /// Segment plus the two wing tips of the arrowhead at `to`.
    Arrow {
        from: Point,
        to: Point,
        wings: [Point; 2],
    },
    Rect {
        bounds: Bounds,
    },
    Ellipse {
        center: Point,
        rx: f64,
        ry: f64,
    },
    Text {
        at: Point,
        content: String,
        font_size: f64,
    },
}

/// A primitive with the shape's identity and style.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneItem {
    pub id: ShapeId,
    pub primitive: Primitive,
    pub color: String,
    pub stroke_width: f64,
    pub cursor: &'static str,
}

/// Build the render list for the whole store.
#[must_use]
pub fn scene(store: &ShapeStore, ui: &UiState) -> Vec<SceneItem> {
    store
        .ordered()
        .map(|shape| SceneItem {
            id: shape.id,
            primitive: primitive(shape),
            color: shape.color.clone(),
            stroke_width: shape.stroke_width,
            cursor: shape_cursor(shape, ui),
        })
        .collect()
}

/// Resolve a shape's geometry into its primitive.
#[must_use]
pub fn primitive(shape: &Shape) -> Primitive {
    let from = Point::new(shape.x1, shape.y1);
    let to = Point::new(shape.x2, shape.y2);
    match shape.kind {
        ShapeKind::Rect => Primitive::Rect { bounds: shape.local_bounds() },
        ShapeKind::Ellipse => {
            let b = shape.local_bounds();
            Primitive::Ellipse { center: b.center(), rx: b.width / 2.0, ry: b.height / 2.0 }
        }
        ShapeKind::Text => Primitive::Text { at: from, content: shape.text_content.clone(), font_size: shape.font_size },
        ShapeKind::Line | ShapeKind::Arrow => match shape.kind.capabilities().endpoint_style {
            EndpointStyle::Arrowhead => Primitive::Arrow { from, to, wings: arrow_wings(from, to) },
            EndpointStyle::Plain | EndpointStyle::None => Primitive::Line { from, to },
        },
    }
}

/// Wing tips of an arrowhead pointing from `from` to `to`.
#[must_use]
pub fn arrow_wings(from: Point, to: Point) -> [Point; 2] {
    let angle = (to.y - from.y).atan2(to.x - from.x);
    let wing = |a: f64| Point::new(to.x - ARROW_SIZE * a.cos(), to.y - ARROW_SIZE * a.sin());
    [wing(angle - ARROW_ANGLE), wing(angle + ARROW_ANGLE)]
}

/// Cursor over the drawing surface itself.
#[must_use]
pub fn surface_cursor(mode: Mode) -> &'static str {
    match mode {
        Mode::Create => "crosshair",
        Mode::Drag | Mode::Selected => "auto",
    }
}

fn shape_cursor(shape: &Shape, ui: &UiState) -> &'static str {
    if shape.kind.capabilities().renders_text {
        if ui.active_id == Some(shape.id) { "move" } else { "text" }
    } else if ui.mode == Mode::Create {
        "pointer"
    } else {
        "auto"
    }
}
