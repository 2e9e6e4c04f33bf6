//! Geometric primitives: `Rect` in viewport (client) coordinates.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle defined by position and size.
///
/// Coordinates are CSS pixels in the host's client space, the same space
/// `getBoundingClientRect` reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X position of the left edge
    pub x: f64,
    /// Y position of the top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle spanning `[left, left + width]` horizontally with zero height.
    #[must_use]
    pub const fn span(left: f64, width: f64) -> Self {
        Self::new(left, 0.0, width, 0.0)
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f64 {
        self.x
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Check if an x coordinate lies inside the horizontal span (inclusive).
    #[must_use]
    pub fn contains_x(&self, x: f64) -> bool {
        x >= self.x && x <= self.right()
    }

    /// Width of the horizontal overlap with another rectangle, never negative.
    #[must_use]
    pub fn horizontal_overlap(&self, other: &Self) -> f64 {
        let left = self.x.max(other.x);
        let right = self.right().min(other.right());
        (right - left).max(0.0)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_rect_default() {
        let r = Rect::default();
        assert_eq!(r.x, 0.0);
        assert_eq!(r.width, 0.0);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 110.0);
    }

    #[test]
    fn test_rect_contains_x() {
        let r = Rect::span(10.0, 100.0);
        assert!(r.contains_x(10.0));
        assert!(r.contains_x(110.0));
        assert!(!r.contains_x(9.9));
        assert!(!r.contains_x(110.1));
    }

    #[test]
    fn test_horizontal_overlap_partial() {
        let viewport = Rect::span(0.0, 300.0);
        let slide = Rect::span(250.0, 100.0);
        assert_eq!(viewport.horizontal_overlap(&slide), 50.0);
    }

    #[test]
    fn test_horizontal_overlap_disjoint() {
        let a = Rect::span(0.0, 100.0);
        let b = Rect::span(200.0, 100.0);
        assert_eq!(a.horizontal_overlap(&b), 0.0);
    }

    #[test]
    fn test_horizontal_overlap_contained() {
        let outer = Rect::span(0.0, 300.0);
        let inner = Rect::span(100.0, 50.0);
        assert_eq!(outer.horizontal_overlap(&inner), 50.0);
    }

    proptest! {
        #[test]
        fn prop_overlap_symmetric(x1 in -1000.0f64..1000.0, w1 in 0.0f64..500.0, x2 in -1000.0f64..1000.0, w2 in 0.0f64..500.0) {
            let a = Rect::span(x1, w1);
            let b = Rect::span(x2, w2);
            prop_assert!((a.horizontal_overlap(&b) - b.horizontal_overlap(&a)).abs() < 1e-9);
        }

        #[test]
        fn prop_overlap_bounded_by_width(x1 in -1000.0f64..1000.0, w1 in 0.0f64..500.0, x2 in -1000.0f64..1000.0, w2 in 0.0f64..500.0) {
            let a = Rect::span(x1, w1);
            let b = Rect::span(x2, w2);
            let overlap = a.horizontal_overlap(&b);
            prop_assert!(overlap >= 0.0);
            prop_assert!(overlap <= w1.min(w2) + 1e-9);
        }
    }
}
