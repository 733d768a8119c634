//! Coordinate frames: local (drawing surface) and page (viewport).
//!
//! Every pointer position is resolved into both frames at once. They differ
//! only by the surface's on-screen offset, which is re-read on every event
//! because the surface may scroll or resize between events.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use serde::{Deserialize, Serialize};

/// A point in either local or page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// On-screen bounding rectangle of the drawing surface, in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SurfaceRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }
}

/// A pointer position resolved into both frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPos {
    /// Local x, relative to the surface's left edge.
    pub x: f64,
    /// Local y, relative to the surface's top edge.
    pub y: f64,
    /// Page x, relative to the viewport.
    pub page_x: f64,
    /// Page y, relative to the viewport.
    pub page_y: f64,
}

impl PointerPos {
    #[must_use]
    pub fn local(&self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn page(&self) -> Point {
        Point::new(self.page_x, self.page_y)
    }
}

/// Tracks the latest raw pointer position and the surface it is measured against.
///
/// An unmounted surface (`None`) is treated as sitting at the page origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateTracker {
    page: Point,
    surface: Option<SurfaceRect>,
}

impl CoordinateTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw page-frame pointer position.
    pub fn track(&mut self, page: Point) {
        self.page = page;
    }

    /// Replace the surface rectangle; `None` means not mounted.
    pub fn set_surface(&mut self, surface: Option<SurfaceRect>) {
        self.surface = surface;
    }

    #[must_use]
    pub fn surface(&self) -> Option<SurfaceRect> {
        self.surface
    }

    /// The latest pointer position in both frames.
    #[must_use]
    pub fn position(&self) -> PointerPos {
        let (left, top) = self.surface.map_or((0.0, 0.0), |s| (s.left, s.top));
        PointerPos {
            x: self.page.x - left,
            y: self.page.y - top,
            page_x: self.page.x,
            page_y: self.page.y,
        }
    }
}
