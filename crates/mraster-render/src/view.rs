#![forbid(unsafe_code)]

//! Scrollable, zoomable preview extraction.
//!
//! This is nearest-neighbour sampling meant for scrolling around a large
//! bitmap on a small display, not for quality scaling.

use mraster_core::debug;
use mraster_core::geometry::Point;
use mraster_core::logging::target;

use crate::bitmap::Bitmap;

/// A sampled view and the parameters actually used to produce it.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// The sampled pixels, exactly the requested size.
    pub bitmap: Bitmap,
    /// Source coordinate of the view's top-left pixel after clamping.
    pub corner: Point,
    /// Source pixels advanced per view pixel.
    pub step: f64,
}

impl Bitmap {
    /// Sample a `width`×`height` view of this bitmap starting at `corner`.
    ///
    /// `zoom_step` is the number of source pixels per view pixel: 1 is 1:1,
    /// 2 shows every other pixel, and so on. It is capped where the whole
    /// bitmap already fits. `zoom_step == 0` picks the step automatically so
    /// the whole bitmap fits, anchored at the origin; a view more than twice
    /// the bitmap's size magnifies it with a fractional step.
    ///
    /// The corner is clamped so the view neither starts before `(0, 0)` nor
    /// runs past the far edges when the bitmap is large enough. View pixels
    /// that still fall outside the source get `edge`.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is 0.
    pub fn extract_view(
        &self,
        width: u32,
        height: u32,
        corner: Point,
        zoom_step: u32,
        edge: bool,
    ) -> View {
        let mut bitmap = Bitmap::new(width, height, false);

        let sw = self.width() as f64;
        let sh = self.height() as f64;
        let max_step = (sw / width as f64).max(sh / height as f64);

        let (step, corner) = if zoom_step == 0 {
            let step = if max_step <= 0.5 {
                max_step
            } else {
                max_step.ceil()
            };
            (step, Point::ORIGIN)
        } else {
            (
                (zoom_step as f64).min(max_step.ceil()),
                Point::new(corner.x.max(0), corner.y.max(0)),
            )
        };

        let corner = Point::new(
            corner.x.min((sw - step * width as f64).floor() as i32).max(0),
            corner.y.min((sh - step * height as f64).floor() as i32).max(0),
        );
        debug!(
            target: target::VIEW,
            step,
            corner_x = corner.x,
            corner_y = corner.y,
            "extract view"
        );

        for y in 0..height as i32 {
            let sy = (y as f64 * step) as i32 + corner.y;
            for x in 0..width as i32 {
                let sx = (x as f64 * step) as i32 + corner.x;
                let value = if sx < self.width() as i32 && sy < self.height() as i32 {
                    self.get_unchecked(sx, sy)
                } else {
                    edge
                };
                if value {
                    bitmap.set_unchecked(x, y, true);
                }
            }
        }

        View {
            bitmap,
            corner,
            step,
        }
    }
}
