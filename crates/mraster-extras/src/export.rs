#![forbid(unsafe_code)]

//! Conversion between bitmaps and RGBA images.
//!
//! Pixels are read and written through [`Bitmap::get`] and
//! [`Bitmap::set`] only. These conversions are for export and previews and
//! favour clarity over speed.

use image::{GenericImageView, Pixel, Rgba, RgbaImage};

use mraster_core::debug;
use mraster_core::logging::target;
use mraster_render::{Bitmap, RasterError};

/// Errors from image conversion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExportError {
    /// A bit plane differs in size from the first plane.
    #[error("bit plane {index} is {actual:?}, expected {expected:?}")]
    DimensionMismatch {
        index: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// No palette entries were given.
    #[error("palette is empty")]
    EmptyPalette,

    /// No bit planes were given.
    #[error("no bit planes to combine")]
    NoPlanes,

    /// The palette does not have one entry per plane combination.
    #[error("{planes} bit planes need {expected} palette entries, got {actual}")]
    PaletteSize {
        planes: usize,
        expected: usize,
        actual: usize,
    },

    /// A source image is smaller than the bitmap it is combined with.
    #[error("{which} image is {actual:?}, bitmap needs at least {required:?}")]
    ImageTooSmall {
        which: &'static str,
        actual: (u32, u32),
        required: (u32, u32),
    },

    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Result alias for image conversion.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Fully transparent black, used for the gaps between LCD pixels.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Look of an LCD-style preview from [`ImageExt::to_display_image`].
///
/// Each bitmap pixel becomes a `pixel_width`×`pixel_height` block with
/// transparent gaps between blocks. Lit pixels in the first `upper_rows`
/// rows use `upper_color`, the rest `lower_color`, mimicking two-colour
/// strip displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LcdStyle {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub gap_width: u32,
    pub gap_height: u32,
    pub upper_rows: u32,
    pub upper_color: Rgba<u8>,
    pub lower_color: Rgba<u8>,
    pub unlit_color: Rgba<u8>,
}

impl LcdStyle {
    /// 3×3 pixels, 1 pixel gaps, pale blue on near black.
    pub const fn new() -> Self {
        Self {
            pixel_width: 3,
            pixel_height: 3,
            gap_width: 1,
            gap_height: 1,
            upper_rows: 0,
            upper_color: Rgba([0xd0, 0xe8, 0xff, 0xff]),
            lower_color: Rgba([0xd0, 0xe8, 0xff, 0xff]),
            unlit_color: Rgba([0x10, 0x14, 0x1c, 0xff]),
        }
    }

    #[must_use]
    pub const fn pixel_size(mut self, width: u32, height: u32) -> Self {
        self.pixel_width = width;
        self.pixel_height = height;
        self
    }

    #[must_use]
    pub const fn gap(mut self, width: u32, height: u32) -> Self {
        self.gap_width = width;
        self.gap_height = height;
        self
    }

    /// Use `upper` for lit pixels in the first `rows` rows and `lower` below.
    #[must_use]
    pub const fn two_tone(mut self, rows: u32, upper: Rgba<u8>, lower: Rgba<u8>) -> Self {
        self.upper_rows = rows;
        self.upper_color = upper;
        self.lower_color = lower;
        self
    }

    /// Use `lit` for every lit pixel.
    #[must_use]
    pub const fn lit(self, lit: Rgba<u8>) -> Self {
        self.two_tone(0, lit, lit)
    }

    #[must_use]
    pub const fn unlit(mut self, unlit: Rgba<u8>) -> Self {
        self.unlit_color = unlit;
        self
    }
}

impl Default for LcdStyle {
    fn default() -> Self {
        Self::new()
    }
}

/// Image conversions for [`Bitmap`].
pub trait ImageExt: Sized {
    /// Threshold `img` into a bitmap of the same size.
    ///
    /// A pixel is lit when its brightest colour channel exceeds `threshold`;
    /// `invert` swaps lit and unlit.
    ///
    /// # Errors
    ///
    /// [`ExportError::Raster`] if the image has a zero dimension.
    fn from_image<I>(img: &I, threshold: u8, invert: bool) -> Result<Self>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>;

    /// One image pixel per bitmap pixel.
    fn to_image(&self, true_color: Rgba<u8>, false_color: Rgba<u8>) -> RgbaImage;

    /// Magnified LCD-style rendering.
    fn to_display_image(&self, style: &LcdStyle) -> RgbaImage;

    /// Take each pixel from `fg` where the bitmap is set and from `bg`
    /// elsewhere.
    ///
    /// # Errors
    ///
    /// [`ExportError::ImageTooSmall`] if either image is smaller than the
    /// bitmap.
    fn fg_bg_image<F, B>(&self, fg: &F, bg: &B) -> Result<RgbaImage>
    where
        F: GenericImageView,
        F::Pixel: Pixel<Subpixel = u8>,
        B: GenericImageView,
        B::Pixel: Pixel<Subpixel = u8>;
}

impl ImageExt for Bitmap {
    fn from_image<I>(img: &I, threshold: u8, invert: bool) -> Result<Self>
    where
        I: GenericImageView,
        I::Pixel: Pixel<Subpixel = u8>,
    {
        let (w, h) = img.dimensions();
        let mut bitmap = Bitmap::try_new(w, h, false)?;
        for (x, y, px) in img.pixels() {
            let rgba = px.to_rgba();
            let brightest = rgba[0].max(rgba[1]).max(rgba[2]);
            bitmap.set(x as i32, y as i32, (brightest > threshold) != invert);
        }
        debug!(target: target::EXPORT, width = w, height = h, threshold, "bitmap from image");
        Ok(bitmap)
    }

    fn to_image(&self, true_color: Rgba<u8>, false_color: Rgba<u8>) -> RgbaImage {
        RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            if self.get(x as i32, y as i32) {
                true_color
            } else {
                false_color
            }
        })
    }

    fn to_display_image(&self, style: &LcdStyle) -> RgbaImage {
        let step_x = style.pixel_width + style.gap_width;
        let step_y = style.pixel_height + style.gap_height;
        let width = self.width() * step_x - style.gap_width;
        let height = self.height() * step_y - style.gap_height;

        RgbaImage::from_fn(width, height, |ix, iy| {
            let (x, y) = (ix / step_x, iy / step_y);
            if ix % step_x >= style.pixel_width || iy % step_y >= style.pixel_height {
                return TRANSPARENT;
            }
            if !self.get(x as i32, y as i32) {
                style.unlit_color
            } else if y < style.upper_rows {
                style.upper_color
            } else {
                style.lower_color
            }
        })
    }

    fn fg_bg_image<F, B>(&self, fg: &F, bg: &B) -> Result<RgbaImage>
    where
        F: GenericImageView,
        F::Pixel: Pixel<Subpixel = u8>,
        B: GenericImageView,
        B::Pixel: Pixel<Subpixel = u8>,
    {
        let required = (self.width(), self.height());
        for (which, actual) in [("foreground", fg.dimensions()), ("background", bg.dimensions())] {
            if actual.0 < required.0 || actual.1 < required.1 {
                return Err(ExportError::ImageTooSmall {
                    which,
                    actual,
                    required,
                });
            }
        }

        Ok(RgbaImage::from_fn(required.0, required.1, |x, y| {
            if self.get(x as i32, y as i32) {
                fg.get_pixel(x, y).to_rgba()
            } else {
                bg.get_pixel(x, y).to_rgba()
            }
        }))
    }
}

/// Combine bit planes into a palette image.
///
/// Plane `n` supplies bit `n` of each pixel's palette index, so `palette`
/// needs exactly `2^planes.len()` entries.
///
/// # Errors
///
/// - [`ExportError::EmptyPalette`] or [`ExportError::NoPlanes`] on empty input.
/// - [`ExportError::DimensionMismatch`] if the planes differ in size.
/// - [`ExportError::PaletteSize`] if the palette has the wrong length.
pub fn planar_color_image(planes: &[Bitmap], palette: &[Rgba<u8>]) -> Result<RgbaImage> {
    if palette.is_empty() {
        return Err(ExportError::EmptyPalette);
    }
    let Some(first) = planes.first() else {
        return Err(ExportError::NoPlanes);
    };

    let expected = (first.width(), first.height());
    for (index, plane) in planes.iter().enumerate() {
        let actual = (plane.width(), plane.height());
        if actual != expected {
            return Err(ExportError::DimensionMismatch {
                index,
                expected,
                actual,
            });
        }
    }

    let needed = 1usize.checked_shl(planes.len() as u32).unwrap_or(usize::MAX);
    if palette.len() != needed {
        return Err(ExportError::PaletteSize {
            planes: planes.len(),
            expected: needed,
            actual: palette.len(),
        });
    }

    Ok(RgbaImage::from_fn(expected.0, expected.1, |x, y| {
        let index = planes
            .iter()
            .enumerate()
            .filter(|(_, plane)| plane.get(x as i32, y as i32))
            .fold(0usize, |acc, (bit, _)| acc | 1 << bit);
        palette[index]
    }))
}
