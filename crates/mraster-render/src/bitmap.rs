#![forbid(unsafe_code)]

//! Packed 1-bit raster storage.
//!
//! A [`Bitmap`] stores one bit per pixel in `u32` words.
//!
//! # Layout
//!
//! Pixels are addressed in row-major order with no per-row padding:
//! `index = y * width + x`. Pixel `index` lives in word `index / 32` at bit
//! `index % 32`, least significant bit first. A row therefore usually starts
//! in the middle of a word.
//!
//! # Invariants
//!
//! 1. `words.len() == ceil(width * height / 32)`
//! 2. Bits of the last word beyond `width * height` are always zero
//! 3. Width and height are non-zero and change only through rotation
//!
//! Reads outside the bitmap return `false`; writes outside it are ignored.

use std::fmt;

use mraster_core::geometry::{Point, Rect};

use crate::error::{RasterError, Result};

/// Storage word.
pub type Word = u32;

/// Pixels per storage word.
pub const WORD_BITS: usize = Word::BITS as usize;

const ALL_ONES: Word = Word::MAX;

/// Word count for `pixels` pixels, rounded up.
#[inline]
pub const fn words_for(pixels: usize) -> usize {
    pixels.div_ceil(WORD_BITS)
}

/// How a masked span is applied to a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanOp {
    Set,
    Clear,
    Toggle,
}

impl SpanOp {
    #[inline]
    fn from_value(value: bool) -> Self {
        if value { SpanOp::Set } else { SpanOp::Clear }
    }

    #[inline]
    fn apply(self, word: &mut Word, mask: Word) {
        match self {
            SpanOp::Set => *word |= mask,
            SpanOp::Clear => *word &= !mask,
            SpanOp::Toggle => *word ^= mask,
        }
    }

    #[inline]
    fn fill(self, words: &mut [Word]) {
        match self {
            SpanOp::Set => words.fill(ALL_ONES),
            SpanOp::Clear => words.fill(0),
            SpanOp::Toggle => words.iter_mut().for_each(|w| *w = !*w),
        }
    }
}

/// A monochrome bitmap packed into machine words.
///
/// # Example
///
/// ```
/// use mraster_core::geometry::Rect;
/// use mraster_render::bitmap::Bitmap;
///
/// let mut bitmap = Bitmap::new(10, 10, false);
/// bitmap.fill(Rect::new(2, 2, 5, 5), true);
/// assert!(bitmap.get(3, 4));
/// assert!(!bitmap.get(6, 4));
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Bitmap {
    width: u32,
    height: u32,
    words: Vec<Word>,
}

impl Bitmap {
    /// Create a bitmap with every pixel set to `fill`.
    ///
    /// # Panics
    ///
    /// Panics if width or height is 0. Use [`Bitmap::try_new`] to get an
    /// error instead.
    pub fn new(width: u32, height: u32, fill: bool) -> Self {
        assert!(width > 0, "bitmap width must be > 0");
        assert!(height > 0, "bitmap height must be > 0");

        let pixels = width as usize * height as usize;
        let mut bitmap = Self {
            width,
            height,
            words: vec![0; words_for(pixels)],
        };
        if fill {
            bitmap.apply_linear(0, pixels, SpanOp::Set);
        }
        bitmap
    }

    /// Fallible form of [`Bitmap::new`].
    pub fn try_new(width: u32, height: u32, fill: bool) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroSize { width, height });
        }
        Ok(Self::new(width, height, fill))
    }

    /// Wrap existing packed storage.
    ///
    /// Padding bits past the last pixel are cleared.
    pub fn from_words(width: u32, height: u32, mut words: Vec<Word>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::ZeroSize { width, height });
        }
        let pixels = width as usize * height as usize;
        let expected = words_for(pixels);
        if words.len() != expected {
            return Err(RasterError::WordCount {
                width,
                height,
                expected,
                actual: words.len(),
            });
        }
        let used = pixels % WORD_BITS;
        if used != 0
            && let Some(last) = words.last_mut()
        {
            *last &= ALL_ONES >> (WORD_BITS - used);
        }
        Ok(Self {
            width,
            height,
            words,
        })
    }

    /// Build a bitmap from text rows: `#` is a set pixel, anything else unset.
    ///
    /// Short rows are padded with unset pixels.
    ///
    /// # Panics
    ///
    /// Panics if `rows` is empty or every row is empty.
    pub fn from_pattern(rows: &[&str]) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let mut bitmap = Self::new(width as u32, rows.len() as u32, false);
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                if ch == '#' {
                    bitmap.set_unchecked(x as i32, y as i32, true);
                }
            }
        }
        bitmap
    }

    /// Bitmap width in pixels.
    #[inline]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Bitmap height in pixels.
    #[inline]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels.
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Bounding rect of the entire bitmap (inclusive corners).
    #[inline]
    pub const fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Packed storage, for serializers and bulk comparisons.
    #[inline]
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of set pixels.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[inline]
    const fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Convert (x, y) to a linear pixel index without bounds checking.
    #[inline]
    fn index_unchecked(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.in_bounds(x, y), "({x}, {y}) outside bitmap");
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y). Returns `false` outside the bitmap.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.in_bounds(x, y) && self.get_unchecked(x, y)
    }

    /// Set the pixel at (x, y). Does nothing outside the bitmap.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        if self.in_bounds(x, y) {
            self.set_unchecked(x, y, value);
        }
    }

    /// Get the pixel at (x, y) without the range check.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the coordinates are out of bounds. In release
    /// builds an out-of-range coordinate reads an arbitrary pixel or panics
    /// on the slice index.
    #[inline]
    pub fn get_unchecked(&self, x: i32, y: i32) -> bool {
        self.bit(self.index_unchecked(x, y))
    }

    /// Set the pixel at (x, y) without the range check.
    ///
    /// # Panics
    ///
    /// Same contract as [`Bitmap::get_unchecked`].
    #[inline]
    pub fn set_unchecked(&mut self, x: i32, y: i32, value: bool) {
        let i = self.index_unchecked(x, y);
        let mask = 1 << (i % WORD_BITS);
        SpanOp::from_value(value).apply(&mut self.words[i / WORD_BITS], mask);
    }

    /// Read pixel `index` in row-major order.
    #[inline]
    pub(crate) fn bit(&self, index: usize) -> bool {
        self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    /// Apply `op` to linear pixels `start..end`.
    ///
    /// Partial first and last words are masked; whole words in between are
    /// written directly.
    fn apply_linear(&mut self, start: usize, end: usize, op: SpanOp) {
        if start >= end {
            return;
        }
        debug_assert!(end <= self.pixel_count());

        let first = start / WORD_BITS;
        let last = (end - 1) / WORD_BITS;
        let head = ALL_ONES << (start % WORD_BITS);
        let tail = ALL_ONES >> (WORD_BITS - 1 - (end - 1) % WORD_BITS);

        if first == last {
            op.apply(&mut self.words[first], head & tail);
            return;
        }
        op.apply(&mut self.words[first], head);
        op.fill(&mut self.words[first + 1..last]);
        op.apply(&mut self.words[last], tail);
    }

    /// Set linear pixels `start..end` to `value`.
    pub(crate) fn fill_linear(&mut self, start: usize, end: usize, value: bool) {
        self.apply_linear(start, end, SpanOp::from_value(value));
    }

    /// Clamp an inclusive column range to the bitmap and convert it to a
    /// linear range on row `y`. Returns `None` when nothing is left.
    fn row_range(&self, x_start: i32, x_end: i32, y: i32) -> Option<(usize, usize)> {
        if y < 0 || y as u32 >= self.height {
            return None;
        }
        let x0 = x_start.max(0);
        let x1 = x_end.min(self.width as i32 - 1);
        if x0 > x1 {
            return None;
        }
        let row = y as usize * self.width as usize;
        Some((row + x0 as usize, row + x1 as usize + 1))
    }

    /// Set every pixel in columns `x_start..=x_end` of row `y` to `value`.
    ///
    /// The span is clamped to the bitmap; an inverted range draws nothing.
    /// Runs in time proportional to the number of words touched.
    pub fn fill_span(&mut self, x_start: i32, x_end: i32, y: i32, value: bool) {
        if let Some((start, end)) = self.row_range(x_start, x_end, y) {
            self.fill_linear(start, end, value);
        }
    }

    /// Set every pixel in rows `y_start..=y_end` of column `x` to `value`.
    pub fn vline(&mut self, x: i32, y_start: i32, y_end: i32, value: bool) {
        if x < 0 || x as u32 >= self.width {
            return;
        }
        let y0 = y_start.max(0);
        let y1 = y_end.min(self.height as i32 - 1);
        for y in y0..=y1 {
            self.set_unchecked(x, y, value);
        }
    }

    /// Fill `area` (inclusive, clamped to the bitmap) with `value`.
    pub fn fill(&mut self, area: Rect, value: bool) {
        let Some(area) = area.intersection_opt(&self.bounds()) else {
            return;
        };
        for y in area.min.y..=area.max.y {
            self.fill_span(area.min.x, area.max.x, y, value);
        }
    }

    /// Set every pixel to `value`.
    pub fn clear(&mut self, value: bool) {
        self.words.fill(0);
        if value {
            self.apply_linear(0, self.pixel_count(), SpanOp::Set);
        }
    }

    /// Invert every pixel in `area` (inclusive, clamped to the bitmap).
    pub fn invert(&mut self, area: Rect) {
        let Some(area) = area.intersection_opt(&self.bounds()) else {
            return;
        };
        for y in area.min.y..=area.max.y {
            if let Some((start, end)) = self.row_range(area.min.x, area.max.x, y) {
                self.apply_linear(start, end, SpanOp::Toggle);
            }
        }
    }

    /// Coordinates of every set pixel, in row-major order.
    pub fn set_pixels(&self) -> impl Iterator<Item = Point> + '_ {
        let width = self.width as usize;
        (0..self.pixel_count())
            .filter(move |&i| self.bit(i))
            .map(move |i| Point::new((i % width) as i32, (i / width) as i32))
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bitmap {}x{}", self.width, self.height)?;
        fmt::Display::fmt(self, f)
    }
}

/// Renders rows of `#` (set) and `.` (unset), one line per row.
impl fmt::Display for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                f.write_str(if self.get_unchecked(x, y) { "#" } else { "." })?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}
