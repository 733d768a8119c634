//! Equal-axis constraint for modifier-held shape creation.
//!
//! With the constraint modifier held, the second anchor is pulled in so that
//! both axis deltas from the first anchor have the smaller of the two
//! magnitudes, keeping the sign of the drag direction. Rectangles and
//! ellipses come out square, lines at 45°.

#[cfg(test)]
#[path = "constrain_test.rs"]
mod constrain_test;

use crate::coords::PointerPos;
use crate::shape::Shape;

/// Drag direction relative to the first anchor, in screen orientation (y down).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    /// Right and below.
    One,
    /// Left and below.
    Two,
    /// Left and above.
    Three,
    /// Right and above.
    Four,
}

impl Quadrant {
    /// Classify the pointer against the anchor. Pointers on either axis
    /// through the anchor fall back to [`Quadrant::One`].
    #[must_use]
    pub fn of(anchor_x: f64, anchor_y: f64, x: f64, y: f64) -> Self {
        let right = x > anchor_x;
        let left = x < anchor_x;
        let below = y > anchor_y;
        let above = y < anchor_y;
        if left && below {
            Self::Two
        } else if left && above {
            Self::Three
        } else if right && above {
            Self::Four
        } else {
            Self::One
        }
    }

    fn x_sign(self) -> f64 {
        match self {
            Self::One | Self::Four => 1.0,
            Self::Two | Self::Three => -1.0,
        }
    }

    fn y_sign(self) -> f64 {
        match self {
            Self::One | Self::Two => 1.0,
            Self::Three | Self::Four => -1.0,
        }
    }
}

/// Where the second anchor goes when `shape` is sized out to `pos`.
///
/// Unconstrained, that is simply `pos`. Constrained, the quadrant and the
/// magnitude come from the local frame and are applied to each frame's own
/// first anchor.
#[must_use]
pub fn second_anchor(shape: &Shape, pos: PointerPos, constrained: bool) -> PointerPos {
    if !constrained {
        return pos;
    }
    let quadrant = Quadrant::of(shape.x1, shape.y1, pos.x, pos.y);
    let dx = (pos.x - shape.x1).abs();
    let dy = (pos.y - shape.y1).abs();
    let m = dx.min(dy);
    let (sx, sy) = (quadrant.x_sign() * m, quadrant.y_sign() * m);
    PointerPos {
        x: shape.x1 + sx,
        y: shape.y1 + sy,
        page_x: shape.page_x1 + sx,
        page_y: shape.page_y1 + sy,
    }
}
