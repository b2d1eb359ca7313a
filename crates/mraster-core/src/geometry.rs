#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are signed so callers can position shapes partially (or
//! entirely) off a bitmap; drawing clips instead of failing.

use core::ops::{Add, Sub};

/// A point in pixel coordinates (origin at top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

const fn saturate(v: i64) -> i32 {
    if v > i32::MAX as i64 {
        i32::MAX
    } else if v < i32::MIN as i64 {
        i32::MIN
    } else {
        v as i32
    }
}

/// An axis-aligned rectangle given by two corners.
///
/// Both corners are **inclusive**: `Rect::new(2, 2, 5, 5)` covers columns
/// and rows 2 through 5. A rectangle whose `max` is below `min` on either
/// axis is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Top-left corner (inclusive).
    pub min: Point,
    /// Bottom-right corner (inclusive).
    pub max: Point,
}

impl Rect {
    /// Create a rectangle from inclusive corner coordinates.
    #[inline]
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self {
            min: Point::new(x0, y0),
            max: Point::new(x1, y1),
        }
    }

    /// Create a rectangle from two corner points.
    #[inline]
    pub const fn from_points(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Create a `width`×`height` rectangle at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::at(Point::ORIGIN, width, height)
    }

    /// Create a `width`×`height` rectangle with its top-left corner at `corner`.
    ///
    /// The far corner saturates at `i32::MAX`, so a rectangle placed near
    /// the coordinate limit is cut short instead of wrapping.
    #[inline]
    pub const fn at(corner: Point, width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Self::empty_at(corner);
        }
        Self {
            min: corner,
            max: Point::new(
                saturate(corner.x as i64 + width as i64 - 1),
                saturate(corner.y as i64 + height as i64 - 1),
            ),
        }
    }

    /// An empty rectangle anchored at `corner`.
    ///
    /// The one corner that cannot anchor an empty rectangle is
    /// `(i32::MIN, i32::MIN)`; it yields the single pixel there.
    #[inline]
    pub const fn empty_at(corner: Point) -> Self {
        Self {
            min: corner,
            max: Point::new(corner.x.saturating_sub(1), corner.y.saturating_sub(1)),
        }
    }

    /// Width in pixels (0 when empty).
    #[inline]
    pub const fn width(&self) -> u32 {
        if self.max.x < self.min.x {
            0
        } else {
            (self.max.x as i64 - self.min.x as i64 + 1) as u32
        }
    }

    /// Height in pixels (0 when empty).
    #[inline]
    pub const fn height(&self) -> u32 {
        if self.max.y < self.min.y {
            0
        } else {
            (self.max.y as i64 - self.min.y as i64 + 1) as u32
        }
    }

    /// Check if the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Swap corners as needed so that `min <= max` on both axes.
    pub fn normalized(&self) -> Rect {
        Rect::new(
            self.min.x.min(self.max.x),
            self.min.y.min(self.max.y),
            self.min.x.max(self.max.x),
            self.min.y.max(self.max.y),
        )
    }

    /// Move the rectangle by `offset`.
    #[inline]
    pub fn translate(&self, offset: Point) -> Rect {
        Rect::from_points(self.min + offset, self.max + offset)
    }

    /// Compute the intersection with another rectangle, returning `None` if
    /// there is no overlap.
    pub fn intersection_opt(&self, other: &Rect) -> Option<Rect> {
        let r = Rect::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
        );
        if r.is_empty() { None } else { Some(r) }
    }

    /// The smallest rectangle containing both. Empty inputs are ignored.
    pub fn union(&self, other: &Rect) -> Rect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Rect::new(
            self.min.x.min(other.min.x),
            self.min.y.min(other.min.y),
            self.max.x.max(other.max.x),
            self.max.y.max(other.max.y),
        )
    }
}
