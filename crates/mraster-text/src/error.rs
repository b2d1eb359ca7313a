#![forbid(unsafe_code)]

//! Error type for font parsing and glyph lookup.

use mraster_render::RasterError;

/// Errors raised while reading a font blob.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FontError {
    /// The blob is shorter than a structure it claims to contain.
    #[error("malformed font: {what} needs bytes {start}..{end}, blob has {len}")]
    MalformedFont {
        what: &'static str,
        start: usize,
        end: usize,
        len: usize,
    },

    /// No block covers the code point.
    #[error("glyph {0:?} not found in font")]
    GlyphNotFound(char),

    /// The header declares a zero glyph dimension.
    #[error("font glyphs must be non-zero, header says {width}x{height}")]
    ZeroGlyphSize { width: u16, height: u16 },

    /// A glyph bitmap handed to the font builder has the wrong size.
    #[error("glyph {ch:?} is {width}x{height}, font glyphs are {expected_width}x{expected_height}")]
    GlyphSize {
        ch: char,
        width: u32,
        height: u32,
        expected_width: u16,
        expected_height: u16,
    },

    /// Glyph data could not be turned into a bitmap.
    #[error(transparent)]
    Raster(#[from] RasterError),
}

/// Result alias for font operations.
pub type Result<T> = std::result::Result<T, FontError>;
