#![forbid(unsafe_code)]

//! Mirroring and quarter-turn rotation.

use mraster_core::debug;
use mraster_core::logging::target;

use crate::bitmap::Bitmap;

impl Bitmap {
    /// Mirror left to right (across the vertical axis).
    pub fn flip_horizontal(&mut self) {
        let w = self.width() as i32;
        let h = self.height() as i32;
        for y in 0..h {
            for x in 0..w / 2 {
                let mirror = w - 1 - x;
                let left = self.get_unchecked(x, y);
                let right = self.get_unchecked(mirror, y);
                self.set_unchecked(x, y, right);
                self.set_unchecked(mirror, y, left);
            }
        }
    }

    /// Mirror top to bottom (across the horizontal axis).
    pub fn flip_vertical(&mut self) {
        let w = self.width() as i32;
        let h = self.height() as i32;
        for y in 0..h / 2 {
            let mirror = h - 1 - y;
            for x in 0..w {
                let top = self.get_unchecked(x, y);
                let bottom = self.get_unchecked(x, mirror);
                self.set_unchecked(x, y, bottom);
                self.set_unchecked(x, mirror, top);
            }
        }
    }

    /// Rotate by `turns` quarter turns; positive is clockwise.
    ///
    /// Quarter turns swap width and height. The rotated image is built in a
    /// fresh bitmap that then replaces this one, so the bitmap is never seen
    /// half rotated.
    pub fn rotate90(&mut self, turns: i32) {
        let turns = turns.rem_euclid(4);
        if turns == 0 {
            return;
        }
        debug!(
            target: target::TRANSFORM,
            turns,
            width = self.width(),
            height = self.height(),
            "rotate bitmap"
        );

        let w = self.width() as i32;
        let h = self.height() as i32;
        let mut rotated = match turns {
            2 => Bitmap::new(self.width(), self.height(), false),
            _ => Bitmap::new(self.height(), self.width(), false),
        };

        for y in 0..h {
            for x in 0..w {
                if !self.get_unchecked(x, y) {
                    continue;
                }
                let (tx, ty) = match turns {
                    1 => (h - 1 - y, x),
                    2 => (w - 1 - x, h - 1 - y),
                    _ => (y, w - 1 - x),
                };
                rotated.set_unchecked(tx, ty, true);
            }
        }

        *self = rotated;
    }
}
