#![allow(clippy::float_cmp)]

use uuid::Uuid;

use super::*;
use crate::shape::ShapeKind;

fn pos(x: f64, y: f64) -> PointerPos {
    PointerPos { x, y, page_x: x + 8.0, page_y: y + 16.0 }
}

fn started_at(x: f64, y: f64) -> Shape {
    Shape::new(Uuid::new_v4(), ShapeKind::Rect, pos(x, y))
}

// =============================================================
// Quadrant
// =============================================================

#[test]
fn quadrant_classification() {
    assert_eq!(Quadrant::of(0.0, 0.0, 5.0, 5.0), Quadrant::One);
    assert_eq!(Quadrant::of(0.0, 0.0, -5.0, 5.0), Quadrant::Two);
    assert_eq!(Quadrant::of(0.0, 0.0, -5.0, -5.0), Quadrant::Three);
    assert_eq!(Quadrant::of(0.0, 0.0, 5.0, -5.0), Quadrant::Four);
}

#[test]
fn quadrant_on_axis_falls_back_to_one() {
    assert_eq!(Quadrant::of(0.0, 0.0, 0.0, -5.0), Quadrant::One);
    assert_eq!(Quadrant::of(0.0, 0.0, -5.0, 0.0), Quadrant::One);
    assert_eq!(Quadrant::of(0.0, 0.0, 0.0, 0.0), Quadrant::One);
}

// =============================================================
// second_anchor
// =============================================================

#[test]
fn unconstrained_returns_pointer() {
    let s = started_at(0.0, 0.0);
    assert_eq!(second_anchor(&s, pos(30.0, 10.0), false), pos(30.0, 10.0));
}

#[test]
fn constrained_quadrant_one_uses_smaller_delta() {
    let s = started_at(0.0, 0.0);
    let p = second_anchor(&s, pos(30.0, 10.0), true);
    assert_eq!((p.x, p.y), (10.0, 10.0));
    assert_eq!((p.page_x, p.page_y), (18.0, 26.0));
}

#[test]
fn constrained_all_quadrants_equal_magnitude() {
    let s = started_at(100.0, 100.0);
    let cases = [
        ((130.0, 110.0), (110.0, 110.0)),
        ((70.0, 140.0), (70.0, 130.0)),
        ((95.0, 20.0), (95.0, 95.0)),
        ((160.0, 75.0), (125.0, 75.0)),
    ];
    for ((px, py), expected) in cases {
        let p = second_anchor(&s, pos(px, py), true);
        assert_eq!((p.x, p.y), expected, "pointer ({px}, {py})");
        assert_eq!((p.x - s.x1).abs(), (p.y - s.y1).abs());
        assert_eq!((p.page_x - s.page_x1).abs(), (p.page_y - s.page_y1).abs());
    }
}

#[test]
fn constrained_on_axis_collapses_to_anchor() {
    let s = started_at(10.0, 10.0);
    let p = second_anchor(&s, pos(10.0, 50.0), true);
    assert_eq!((p.x, p.y), (10.0, 10.0));
}

#[test]
fn constrained_page_frame_uses_page_first_anchor() {
    let mut s = started_at(0.0, 0.0);
    // Surface moved since creation: page anchor no longer at local + (8, 16).
    s.page_x1 = 500.0;
    s.page_y1 = 400.0;
    let p = second_anchor(&s, pos(-20.0, -50.0), true);
    assert_eq!((p.x, p.y), (-20.0, -20.0));
    assert_eq!((p.page_x, p.page_y), (480.0, 380.0));
}
