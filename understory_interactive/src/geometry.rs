// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hit-test helpers for element implementations.
//!
//! The manager never hit-tests on its own; it asks each element through
//! [`Element::contains`](crate::element::Element::contains). These helpers are what
//! simple rectangular elements typically call from there.
//!
//! Unlike [`Rect::contains`], which is half-open on the far edges, both helpers here
//! treat all four edges as inside. A pointer resting on the right or bottom border of a
//! button still hovers it.
//!
//! ```
//! use understory_interactive::geometry::inside_rect;
//!
//! assert!(inside_rect(0.0, 0.0, 10.0, 10.0, 10.0, 10.0));
//! assert!(!inside_rect(0.0, 0.0, 10.0, 10.0, 10.5, 3.0));
//! ```

use kurbo::{Point, Rect};

/// Returns `true` if `(px, py)` lies within the rectangle at `(x, y)` with the given size.
///
/// All four edges are inclusive.
pub fn inside_rect(x: f64, y: f64, width: f64, height: f64, px: f64, py: f64) -> bool {
    px >= x && px <= x + width && py >= y && py <= y + height
}

/// Returns `true` if `pt` lies within `rect`, counting all four edges as inside.
///
/// The rectangle is normalized first, so a rect built with `x1 < x0` behaves the
/// same as its abs counterpart.
pub fn contains_inclusive(rect: Rect, pt: Point) -> bool {
    let r = rect.abs();
    inside_rect(r.x0, r.y0, r.width(), r.height(), pt.x, pt.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_inclusive() {
        // Corners.
        assert!(inside_rect(0.0, 0.0, 10.0, 10.0, 0.0, 0.0));
        assert!(inside_rect(0.0, 0.0, 10.0, 10.0, 10.0, 0.0));
        assert!(inside_rect(0.0, 0.0, 10.0, 10.0, 0.0, 10.0));
        assert!(inside_rect(0.0, 0.0, 10.0, 10.0, 10.0, 10.0));
        // Interior.
        assert!(inside_rect(0.0, 0.0, 10.0, 10.0, 5.0, 5.0));
    }

    #[test]
    fn outside_each_edge() {
        assert!(!inside_rect(0.0, 0.0, 10.0, 10.0, -0.1, 5.0));
        assert!(!inside_rect(0.0, 0.0, 10.0, 10.0, 10.1, 5.0));
        assert!(!inside_rect(0.0, 0.0, 10.0, 10.0, 5.0, -0.1));
        assert!(!inside_rect(0.0, 0.0, 10.0, 10.0, 5.0, 10.1));
    }

    #[test]
    fn offset_rect() {
        assert!(inside_rect(20.0, 30.0, 5.0, 5.0, 25.0, 35.0));
        assert!(!inside_rect(20.0, 30.0, 5.0, 5.0, 5.0, 5.0));
    }

    #[test]
    fn zero_sized_rect_contains_its_origin() {
        assert!(inside_rect(3.0, 4.0, 0.0, 0.0, 3.0, 4.0));
        assert!(!inside_rect(3.0, 4.0, 0.0, 0.0, 3.0, 4.5));
    }

    #[test]
    fn kurbo_rect_far_edges_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        // kurbo's own contains is half-open on the far edges.
        assert!(!r.contains(Point::new(10.0, 10.0)));
        assert!(contains_inclusive(r, Point::new(10.0, 10.0)));
        assert!(!contains_inclusive(r, Point::new(20.0, 20.0)));
    }

    #[test]
    fn flipped_rect_is_normalized() {
        let r = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert!(contains_inclusive(r, Point::new(0.0, 0.0)));
        assert!(contains_inclusive(r, Point::new(5.0, 10.0)));
    }
}
