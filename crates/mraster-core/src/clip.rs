#![forbid(unsafe_code)]

//! Cohen–Sutherland line clipping.
//!
//! Drawing code clips every segment against the target bounds before
//! rasterizing, so the rasterizer itself can write pixels without per-pixel
//! bounds checks.
//!
//! Intersections are computed in widened integer arithmetic from the
//! unclipped segment's deltas and rounded to the nearest pixel.

use crate::geometry::{Point, Rect};

bitflags::bitflags! {
    /// Position of a point relative to the four half-planes of a viewport.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Outcode: u8 {
        /// `x < min.x`
        const LEFT   = 0b0001;
        /// `x > max.x`
        const RIGHT  = 0b0010;
        /// `y > max.y` (below the viewport on screen)
        const BOTTOM = 0b0100;
        /// `y < min.y` (above the viewport on screen)
        const TOP    = 0b1000;
    }
}

/// Clipping passes needed for a convex rectangle: each endpoint crosses at
/// most two boundaries.
const MAX_PASSES: usize = 4;

/// Classify `p` against `viewport` (inclusive corners).
pub fn outcode(p: Point, viewport: &Rect) -> Outcode {
    let mut code = Outcode::empty();
    if p.x < viewport.min.x {
        code |= Outcode::LEFT;
    } else if p.x > viewport.max.x {
        code |= Outcode::RIGHT;
    }
    if p.y < viewport.min.y {
        code |= Outcode::TOP;
    } else if p.y > viewport.max.y {
        code |= Outcode::BOTTOM;
    }
    code
}

/// Clip the segment `a`–`b` to `viewport`.
///
/// Returns the (possibly shortened) endpoints, or `None` if no part of the
/// segment lies inside the viewport. Segments already inside are returned
/// unchanged. Endpoint order is preserved.
pub fn clip_line(a: Point, b: Point, viewport: &Rect) -> Option<(Point, Point)> {
    if viewport.is_empty() {
        return None;
    }

    let origin = a;
    let dx = b.x as i128 - a.x as i128;
    let dy = b.y as i128 - a.y as i128;

    let (mut a, mut b) = (a, b);
    let mut code_a = outcode(a, viewport);
    let mut code_b = outcode(b, viewport);

    for pass in 0..=MAX_PASSES {
        if code_a.is_empty() && code_b.is_empty() {
            return Some((a, b));
        }
        if code_a.intersects(code_b) || pass == MAX_PASSES {
            return None;
        }

        let code_out = if code_a.is_empty() { code_b } else { code_a };

        // Only the boundary on an axis with a non-zero delta is ever evaluated.
        let moved = if code_out.intersects(Outcode::TOP | Outcode::BOTTOM) && dy != 0 {
            let edge = if code_out.contains(Outcode::TOP) {
                viewport.min.y
            } else {
                viewport.max.y
            };
            let x = origin.x as i128 + div_round(dx * (edge as i128 - origin.y as i128), dy);
            Point::new(x as i32, edge)
        } else if code_out.intersects(Outcode::LEFT | Outcode::RIGHT) && dx != 0 {
            let edge = if code_out.contains(Outcode::LEFT) {
                viewport.min.x
            } else {
                viewport.max.x
            };
            let y = origin.y as i128 + div_round(dy * (edge as i128 - origin.x as i128), dx);
            Point::new(edge, y as i32)
        } else {
            return None;
        };

        if code_out == code_a {
            a = moved;
            code_a = outcode(a, viewport);
        } else {
            b = moved;
            code_b = outcode(b, viewport);
        }
    }

    None
}

/// Integer division rounding half away from zero. `d` must be non-zero.
fn div_round(n: i128, d: i128) -> i128 {
    let (n, d) = if d < 0 { (-n, -d) } else { (n, d) };
    if n >= 0 {
        (2 * n + d) / (2 * d)
    } else {
        -((-2 * n + d) / (2 * d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Rect = Rect::new(0, 0, 10, 10);

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn inside_segment_is_unchanged() {
        assert_eq!(clip_line(p(1, 2), p(9, 7), &VIEW), Some((p(1, 2), p(9, 7))));
        assert_eq!(clip_line(p(0, 0), p(10, 10), &VIEW), Some((p(0, 0), p(10, 10))));
    }

    #[test]
    fn segment_left_of_viewport_is_rejected() {
        assert_eq!(clip_line(p(-5, 0), p(-1, 10), &VIEW), None);
    }

    #[test]
    fn horizontal_line_is_trimmed() {
        assert_eq!(clip_line(p(-5, 4), p(20, 4), &VIEW), Some((p(0, 4), p(10, 4))));
    }

    #[test]
    fn vertical_line_is_trimmed() {
        assert_eq!(clip_line(p(3, -7), p(3, 30), &VIEW), Some((p(3, 0), p(3, 10))));
    }

    #[test]
    fn horizontal_line_outside_is_rejected() {
        assert_eq!(clip_line(p(-5, -1), p(20, -1), &VIEW), None);
        assert_eq!(clip_line(p(11, -3), p(11, 40), &VIEW), None);
    }

    #[test]
    fn diagonal_through_corners() {
        assert_eq!(clip_line(p(-5, -5), p(15, 15), &VIEW), Some((p(0, 0), p(10, 10))));
        assert_eq!(clip_line(p(15, -5), p(-5, 15), &VIEW), Some((p(10, 0), p(0, 10))));
    }

    #[test]
    fn diagonal_missing_corner_is_rejected() {
        // Passes above and to the right of the (10, 0) corner.
        assert_eq!(clip_line(p(8, -5), p(16, 3), &VIEW), None);
    }

    #[test]
    fn endpoint_order_is_preserved() {
        let (a, b) = clip_line(p(20, 5), p(5, 5), &VIEW).unwrap();
        assert_eq!((a, b), (p(10, 5), p(5, 5)));
    }

    #[test]
    fn outcodes() {
        assert_eq!(outcode(p(-1, -1), &VIEW), Outcode::LEFT | Outcode::TOP);
        assert_eq!(outcode(p(11, 11), &VIEW), Outcode::RIGHT | Outcode::BOTTOM);
        assert!(outcode(p(10, 0), &VIEW).is_empty());
    }

    #[test]
    fn rounding_division() {
        assert_eq!(div_round(7, 2), 4);
        assert_eq!(div_round(-7, 2), -4);
        assert_eq!(div_round(5, -3), -2);
        assert_eq!(div_round(1, 3), 0);
    }
}
