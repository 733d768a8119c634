#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::coords::PointerPos;
use crate::shape::AnchorSlot;

fn pos(x: f64, y: f64) -> PointerPos {
    PointerPos { x, y, page_x: x, page_y: y }
}

fn make(kind: ShapeKind, a: (f64, f64), b: (f64, f64)) -> Shape {
    let mut s = Shape::new(Uuid::new_v4(), kind, pos(a.0, a.1));
    s.set_anchor(AnchorSlot::Second, pos(b.0, b.1));
    s
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// =============================================================
// primitive
// =============================================================

#[test]
fn rect_resolves_min_max_in_every_quadrant() {
    let quadrants = [
        ((10.0, 10.0), (50.0, 30.0)),
        ((50.0, 10.0), (10.0, 30.0)),
        ((50.0, 30.0), (10.0, 10.0)),
        ((10.0, 30.0), (50.0, 10.0)),
    ];
    for (a, b) in quadrants {
        let p = primitive(&make(ShapeKind::Rect, a, b));
        assert_eq!(p, Primitive::Rect { bounds: Bounds { x: 10.0, y: 10.0, width: 40.0, height: 20.0 } });
    }
}

#[test]
fn ellipse_centres_on_anchor_midpoint() {
    let p = primitive(&make(ShapeKind::Ellipse, (60.0, 40.0), (20.0, 0.0)));
    assert_eq!(p, Primitive::Ellipse { center: Point::new(40.0, 20.0), rx: 20.0, ry: 20.0 });
}

#[test]
fn line_keeps_anchor_direction() {
    let p = primitive(&make(ShapeKind::Line, (60.0, 40.0), (20.0, 0.0)));
    assert_eq!(p, Primitive::Line { from: Point::new(60.0, 40.0), to: Point::new(20.0, 0.0) });
}

#[test]
fn arrow_has_head_at_second_anchor() {
    let p = primitive(&make(ShapeKind::Arrow, (0.0, 0.0), (100.0, 0.0)));
    let Primitive::Arrow { from, to, wings } = p else {
        panic!("expected arrow, got {p:?}");
    };
    assert_eq!(from, Point::new(0.0, 0.0));
    assert_eq!(to, Point::new(100.0, 0.0));
    for w in wings {
        assert!(w.x < 100.0);
        assert!(close(w.x, 100.0 - ARROW_SIZE * ARROW_ANGLE.cos()));
    }
    assert!(close(wings[0].y, -wings[1].y));
}

#[test]
fn text_renders_at_first_anchor() {
    let mut s = make(ShapeKind::Text, (5.0, 6.0), (99.0, 99.0));
    s.text_content = "hello".into();
    s.font_size = 32.0;
    let p = primitive(&s);
    assert_eq!(p, Primitive::Text { at: Point::new(5.0, 6.0), content: "hello".into(), font_size: 32.0 });
}

// =============================================================
// scene
// =============================================================

#[test]
fn scene_is_in_creation_order_with_style() {
    let mut store = ShapeStore::new();
    let mut a = make(ShapeKind::Rect, (0.0, 0.0), (1.0, 1.0));
    a.color = "blue".into();
    let b = make(ShapeKind::Line, (0.0, 0.0), (1.0, 1.0));
    let (ia, ib) = (a.id, b.id);
    store.insert(a);
    store.insert(b);
    let items = scene(&store, &UiState::default());
    assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![ia, ib]);
    assert_eq!(items[0].color, "blue");
    assert_eq!(items[1].stroke_width, 2.0);
}

#[test]
fn cursors_follow_mode_and_activity() {
    let mut store = ShapeStore::new();
    let rect = make(ShapeKind::Rect, (0.0, 0.0), (1.0, 1.0));
    let text = make(ShapeKind::Text, (0.0, 0.0), (0.0, 0.0));
    let text_id = text.id;
    store.insert(rect);
    store.insert(text);

    let idle = scene(&store, &UiState::default());
    assert_eq!(idle[0].cursor, "pointer");
    assert_eq!(idle[1].cursor, "text");

    let selected = UiState { mode: Mode::Selected, active_id: Some(text_id) };
    let items = scene(&store, &selected);
    assert_eq!(items[0].cursor, "auto");
    assert_eq!(items[1].cursor, "move");
}

#[test]
fn surface_cursor_by_mode() {
    assert_eq!(surface_cursor(Mode::Create), "crosshair");
    assert_eq!(surface_cursor(Mode::Drag), "auto");
    assert_eq!(surface_cursor(Mode::Selected), "auto");
}
