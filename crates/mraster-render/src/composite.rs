#![forbid(unsafe_code)]

//! Bitmap-to-bitmap compositing.

use mraster_core::geometry::{Point, Rect};

use crate::bitmap::Bitmap;

bitflags::bitflags! {
    /// Which source pixels [`Bitmap::draw_bitmap`] copies, and how.
    ///
    /// `ON_TRUE` and `ON_FALSE` select the source values that are written;
    /// unselected source pixels leave the target untouched, which is how
    /// glyphs and sprites are drawn "transparently". `INVERT` flips the value
    /// written for every selected pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DrawFlags: u8 {
        /// Copy set source pixels.
        const ON_TRUE  = 0b001;
        /// Copy unset source pixels.
        const ON_FALSE = 0b010;
        /// Write the inverse of each copied source pixel.
        const INVERT   = 0b100;

        /// Copy every source pixel.
        const OPAQUE = Self::ON_TRUE.bits() | Self::ON_FALSE.bits();
    }
}

impl Default for DrawFlags {
    fn default() -> Self {
        DrawFlags::OPAQUE
    }
}

impl Bitmap {
    /// Composite `source_area` of `source` onto this bitmap with its top-left
    /// corner at `target_corner`.
    ///
    /// The copied area is clamped to both bitmaps, so pixels that would be
    /// read from outside `source` or written outside `self` are skipped
    /// while the rest keep their alignment.
    pub fn draw_bitmap(
        &mut self,
        source: &Bitmap,
        source_area: Rect,
        target_corner: Point,
        flags: DrawFlags,
    ) {
        let on_true = flags.contains(DrawFlags::ON_TRUE);
        let on_false = flags.contains(DrawFlags::ON_FALSE);
        if !on_true && !on_false {
            return;
        }
        let invert = flags.contains(DrawFlags::INVERT);

        let Some(src) = source_area.intersection_opt(&source.bounds()) else {
            return;
        };
        // Clamping the source shifts the target corner by the same amount.
        // The shift is never negative, so only the upper end can leave i32.
        let shift = |t: i32, clamped: i32, requested: i32| {
            i32::try_from(t as i64 + (clamped as i64 - requested as i64)).ok()
        };
        let (Some(cx), Some(cy)) = (
            shift(target_corner.x, src.min.x, source_area.min.x),
            shift(target_corner.y, src.min.y, source_area.min.y),
        ) else {
            return;
        };
        let corner = Point::new(cx, cy);
        let placed = Rect::at(corner, src.width(), src.height());
        let Some(dst) = placed.intersection_opt(&self.bounds()) else {
            return;
        };
        // source = target + offset
        let offset = src.min - corner;

        for y in dst.min.y..=dst.max.y {
            let sy = y + offset.y;
            if on_true && on_false {
                for x in dst.min.x..=dst.max.x {
                    let v = source.get_unchecked(x + offset.x, sy);
                    self.set_unchecked(x, y, v != invert);
                }
            } else {
                for x in dst.min.x..=dst.max.x {
                    let v = source.get_unchecked(x + offset.x, sy);
                    if v == on_true {
                        self.set_unchecked(x, y, v != invert);
                    }
                }
            }
        }
    }

    /// Copy `area` (clamped to the bitmap) into a new bitmap.
    ///
    /// Returns `None` if the clamped area is empty.
    pub fn crop(&self, area: Rect) -> Option<Bitmap> {
        let area = area.intersection_opt(&self.bounds())?;
        let mut cropped = Bitmap::new(area.width(), area.height(), false);
        cropped.draw_bitmap(self, area, Point::ORIGIN, DrawFlags::OPAQUE);
        Some(cropped)
    }
}
