#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;

fn pos(x: f64, y: f64) -> PointerPos {
    PointerPos { x, y, page_x: x + 100.0, page_y: y + 50.0 }
}

fn make_shape(kind: ShapeKind, a: (f64, f64), b: (f64, f64)) -> Shape {
    let mut shape = Shape::new(Uuid::new_v4(), kind, pos(a.0, a.1));
    shape.set_anchor(AnchorSlot::Second, pos(b.0, b.1));
    shape
}

// =============================================================
// ShapeKind
// =============================================================

#[test]
fn kind_serde_all_variants() {
    let cases = [
        (ShapeKind::Line, "\"line\""),
        (ShapeKind::Arrow, "\"arrow\""),
        (ShapeKind::Rect, "\"rect\""),
        (ShapeKind::Ellipse, "\"ellipse\""),
        (ShapeKind::Text, "\"text\""),
    ];
    for (kind, expected) in cases {
        assert_eq!(serde_json::to_string(&kind).unwrap(), expected);
        let back: ShapeKind = serde_json::from_str(expected).unwrap();
        assert_eq!(back, kind);
    }
}

#[test]
fn kind_from_str_matches_as_str() {
    for kind in ShapeKind::ALL {
        assert_eq!(kind.as_str().parse::<ShapeKind>().unwrap(), kind);
        assert_eq!(kind.to_string(), kind.as_str());
    }
}

#[test]
fn kind_from_str_rejects_unknown() {
    let err = "hexagon".parse::<ShapeKind>().unwrap_err();
    assert!(matches!(err, AnnotateError::UnknownShapeKind(ref s) if s == "hexagon"));
}

#[test]
fn capabilities_line_uses_endpoints() {
    let caps = ShapeKind::Line.capabilities();
    assert!(caps.has_endpoint_handles);
    assert!(!caps.has_resize_handles);
    assert_eq!(caps.endpoint_style, EndpointStyle::Plain);
}

#[test]
fn capabilities_text_has_no_handles() {
    let caps = ShapeKind::Text.capabilities();
    assert!(!caps.has_endpoint_handles);
    assert!(!caps.has_resize_handles);
    assert!(caps.renders_text);
}

#[test]
fn capabilities_box_kinds_resize() {
    for kind in [ShapeKind::Rect, ShapeKind::Ellipse, ShapeKind::Arrow] {
        let caps = kind.capabilities();
        assert!(caps.has_resize_handles, "{kind}");
        assert!(!caps.has_endpoint_handles, "{kind}");
        assert!(!caps.renders_text, "{kind}");
    }
    assert_eq!(ShapeKind::Arrow.capabilities().endpoint_style, EndpointStyle::Arrowhead);
}

// =============================================================
// Shape / Bounds
// =============================================================

#[test]
fn new_shape_is_zero_size_in_both_frames() {
    let s = Shape::new(Uuid::new_v4(), ShapeKind::Rect, pos(10.0, 20.0));
    assert_eq!((s.x1, s.y1, s.x2, s.y2), (10.0, 20.0, 10.0, 20.0));
    assert_eq!((s.page_x1, s.page_y1, s.page_x2, s.page_y2), (110.0, 70.0, 110.0, 70.0));
    assert_eq!(s.local_bounds(), Bounds { x: 10.0, y: 20.0, width: 0.0, height: 0.0 });
}

#[test]
fn bounds_independent_of_anchor_order() {
    let quadrants = [
        ((10.0, 10.0), (50.0, 30.0)),
        ((50.0, 10.0), (10.0, 30.0)),
        ((50.0, 30.0), (10.0, 10.0)),
        ((10.0, 30.0), (50.0, 10.0)),
    ];
    for (a, b) in quadrants {
        let s = make_shape(ShapeKind::Rect, a, b);
        assert_eq!(s.local_bounds(), Bounds { x: 10.0, y: 10.0, width: 40.0, height: 20.0 });
        assert_eq!(s.page_bounds(), Bounds { x: 110.0, y: 60.0, width: 40.0, height: 20.0 });
    }
}

#[test]
fn bounds_edges_and_center() {
    let b = Bounds::from_corners(Point::new(50.0, 30.0), Point::new(10.0, 10.0));
    assert_eq!(b.right(), 50.0);
    assert_eq!(b.bottom(), 30.0);
    assert_eq!(b.center(), Point::new(30.0, 20.0));
}

#[test]
fn set_coord_updates_both_frames() {
    let mut s = make_shape(ShapeKind::Rect, (0.0, 0.0), (10.0, 10.0));
    s.set_coord(AnchorSlot::Second, Axis::Y, 42.0, 142.0);
    assert_eq!(s.y2, 42.0);
    assert_eq!(s.page_y2, 142.0);
    assert_eq!(s.coord(AnchorSlot::Second, Axis::Y), 42.0);
    assert_eq!(s.x2, 10.0);
}

#[test]
fn anchor_slot_other_flips() {
    assert_eq!(AnchorSlot::First.other(), AnchorSlot::Second);
    assert_eq!(AnchorSlot::Second.other(), AnchorSlot::First);
}

#[test]
fn shape_serializes_camel_case_with_type_tag() {
    let s = make_shape(ShapeKind::Ellipse, (1.0, 2.0), (3.0, 4.0));
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(v["type"], "ellipse");
    assert_eq!(v["pageX2"], 103.0);
    assert_eq!(v["strokeWidth"], 2.0);
    assert_eq!(v["textContent"], "default text");
    let back: Shape = serde_json::from_value(v).unwrap();
    assert_eq!(back, s);
}

// =============================================================
// PartialShape
// =============================================================

#[test]
fn partial_applies_only_present_fields() {
    let s = make_shape(ShapeKind::Text, (0.0, 0.0), (0.0, 0.0));
    let partial = PartialShape { font_size: Some(32.0), ..Default::default() };
    let next = partial.applied_to(&s);
    assert_eq!(next.font_size, 32.0);
    assert_eq!(next.color, s.color);
    assert_eq!(next.text_content, s.text_content);
}

// =============================================================
// ShapeStore
// =============================================================

#[test]
fn store_insert_tracks_order() {
    let mut store = ShapeStore::new();
    let a = make_shape(ShapeKind::Rect, (0.0, 0.0), (1.0, 1.0));
    let b = make_shape(ShapeKind::Line, (0.0, 0.0), (1.0, 1.0));
    let (ia, ib) = (a.id, b.id);
    store.insert(a);
    store.insert(b);
    assert_eq!(store.order(), &[ia, ib]);
    assert_eq!(store.len(), 2);
    let ids: Vec<_> = store.ordered().map(|s| s.id).collect();
    assert_eq!(ids, vec![ia, ib]);
}

#[test]
fn store_insert_same_id_keeps_position() {
    let mut store = ShapeStore::new();
    let a = make_shape(ShapeKind::Rect, (0.0, 0.0), (1.0, 1.0));
    let b = make_shape(ShapeKind::Rect, (0.0, 0.0), (1.0, 1.0));
    let (ia, ib) = (a.id, b.id);
    store.insert(a.clone());
    store.insert(b);
    let mut moved = a;
    moved.x2 = 99.0;
    store.insert(moved);
    assert_eq!(store.order(), &[ia, ib]);
    assert_eq!(store.get(&ia).unwrap().x2, 99.0);
}

#[test]
fn store_replace_unknown_is_false() {
    let mut store = ShapeStore::new();
    let s = make_shape(ShapeKind::Rect, (0.0, 0.0), (1.0, 1.0));
    assert!(!store.replace(s));
    assert!(store.is_empty());
}

#[test]
fn store_apply_partial() {
    let mut store = ShapeStore::new();
    let s = make_shape(ShapeKind::Rect, (0.0, 0.0), (1.0, 1.0));
    let id = s.id;
    store.insert(s);
    let partial = PartialShape { color: Some("blue".into()), ..Default::default() };
    assert!(store.apply_partial(&id, &partial));
    assert_eq!(store.get(&id).unwrap().color, "blue");
    assert!(!store.apply_partial(&Uuid::new_v4(), &partial));
}

#[test]
fn store_remove_keeps_map_and_order_in_sync() {
    let mut store = ShapeStore::new();
    let a = make_shape(ShapeKind::Rect, (0.0, 0.0), (1.0, 1.0));
    let b = make_shape(ShapeKind::Rect, (0.0, 0.0), (1.0, 1.0));
    let (ia, ib) = (a.id, b.id);
    store.insert(a);
    store.insert(b);
    assert!(store.remove(&ia).is_some());
    assert_eq!(store.order(), &[ib]);
    assert!(!store.contains(&ia));
    assert!(store.remove(&ia).is_none());
    assert_eq!(store.len(), 1);
}

#[test]
fn store_pop_last_is_lifo() {
    let mut store = ShapeStore::new();
    let a = make_shape(ShapeKind::Rect, (0.0, 0.0), (1.0, 1.0));
    let b = make_shape(ShapeKind::Rect, (0.0, 0.0), (1.0, 1.0));
    let (ia, ib) = (a.id, b.id);
    store.insert(a);
    store.insert(b);
    assert_eq!(store.pop_last().unwrap().id, ib);
    assert_eq!(store.pop_last().unwrap().id, ia);
    assert!(store.pop_last().is_none());
    assert!(store.order().is_empty());
}
