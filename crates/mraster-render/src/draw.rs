#![forbid(unsafe_code)]

//! Drawing primitives for the bitmap.
//!
//! Shapes may extend past the bitmap edges. Lines are clipped with
//! Cohen–Sutherland before rasterizing so the inner loop writes without
//! bounds checks; circles go through the clamped pixel and span setters.

use mraster_core::clip::clip_line;
use mraster_core::geometry::{Point, Rect};

use crate::bitmap::Bitmap;

/// Extension trait for drawing shapes on a [`Bitmap`].
pub trait Draw {
    /// Draw a line from `p0` to `p1` (both inclusive) using Bresenham's
    /// algorithm.
    fn line(&mut self, p0: Point, p1: Point, value: bool);

    /// Draw the one-pixel outline of `area` (inclusive corners).
    fn rectangle(&mut self, area: Rect, value: bool);

    /// Draw a circle outline using the midpoint algorithm.
    fn circle(&mut self, center: Point, radius: i32, value: bool) {
        if radius < 0 {
            return;
        }
        let (cx, cy) = (center.x, center.y);
        // Saturated coordinates are off any bitmap, so those writes drop out.
        midpoint_octants(radius, |x, y| {
            for (dx, dy) in [(x, y), (y, x)] {
                let (left, right) = (cx.saturating_sub(dx), cx.saturating_add(dx));
                let (top, bottom) = (cy.saturating_sub(dy), cy.saturating_add(dy));
                self.set(right, bottom, value);
                self.set(left, bottom, value);
                self.set(right, top, value);
                self.set(left, top, value);
            }
        });
    }

    fn circle_filled(&mut self, center: Point, radius: i32, value: bool) {
        if radius < 0 {
            return;
        }
        let (cx, cy) = (center.x, center.y);
        midpoint_octants(radius, |x, y| {
            for (dx, dy) in [(x, y), (y, x)] {
                let (left, right) = (cx.saturating_sub(dx), cx.saturating_add(dx));
                self.fill_span(left, right, cy.saturating_add(dy), value);
                self.fill_span(left, right, cy.saturating_sub(dy), value);
            }
        });
    }
}

/// Walk one octant of a circle of `radius` centred on the origin, calling
/// `plot(x, y)` with `x >= y >= 0` for each step.
fn midpoint_octants(radius: i32, mut plot: impl FnMut(i32, i32)) {
    let mut x = radius;
    let mut y = 0;
    let mut d = 1 - radius;

    while x >= y {
        plot(x, y);
        y += 1;
        if d < 0 {
            d += 2 * y + 1;
        } else {
            x -= 1;
            d += 2 * (y - x) + 1;
        }
    }
}
