#![forbid(unsafe_code)]

//! Compact binary bitmap font format.
//!
//! # Format
//!
//! All integers are little-endian.
//!
//! ```text
//! u16 glyph width
//! u16 glyph height
//! repeated blocks:
//!     u32 first code point
//!     u8  code point count
//!     count × ceil(width * height / 8) bytes of glyph data
//! ```
//!
//! Glyph data is row-major, one bit per pixel, least significant bit first,
//! with each glyph starting on a byte boundary. This is the same bit order as
//! [`Bitmap`] storage, so glyphs convert by copying words.
//!
//! Blocks need not be sorted or contiguous. A code point resolves to the
//! first block whose range contains it.

use mraster_core::logging::target;
use mraster_core::{debug, warn};
use mraster_render::Bitmap;
use mraster_render::bitmap::Word;

use crate::error::{FontError, Result};

/// Size of the font header in bytes.
pub const HEADER_LEN: usize = 4;

/// Size of a block header in bytes.
pub const BLOCK_HEADER_LEN: usize = 5;

/// Most glyphs a single block can hold.
pub const MAX_BLOCK_GLYPHS: usize = u8::MAX as usize;

/// Glyph dimensions from the first four bytes of a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontHeader {
    pub glyph_width: u16,
    pub glyph_height: u16,
}

impl FontHeader {
    /// Bytes of packed data per glyph.
    #[inline]
    pub const fn bytes_per_glyph(&self) -> usize {
        (self.glyph_width as usize * self.glyph_height as usize).div_ceil(8)
    }
}

/// Read the glyph dimensions from the start of `bytes`.
///
/// # Errors
///
/// [`FontError::MalformedFont`] if `bytes` is shorter than the header.
pub fn parse_header(bytes: &[u8]) -> Result<FontHeader> {
    match bytes {
        [w0, w1, h0, h1, ..] => Ok(FontHeader {
            glyph_width: u16::from_le_bytes([*w0, *w1]),
            glyph_height: u16::from_le_bytes([*h0, *h1]),
        }),
        _ => Err(FontError::MalformedFont {
            what: "header",
            start: 0,
            end: HEADER_LEN,
            len: bytes.len(),
        }),
    }
}

/// A run of consecutive code points stored together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GlyphBlock {
    /// First code point in the block.
    pub first: u32,
    /// Number of code points in the block.
    pub count: u8,
    /// Byte offset of the first glyph's data.
    data_offset: usize,
}

impl GlyphBlock {
    /// Whether `code` falls in `first..first + count`.
    #[inline]
    pub const fn contains(&self, code: u32) -> bool {
        // u64 so blocks near u32::MAX cannot wrap.
        self.first <= code && (code as u64) < self.first as u64 + self.count as u64
    }

    /// The block's code points that are valid `char`s.
    pub fn chars(self) -> impl Iterator<Item = char> {
        let first = self.first as u64;
        (first..first + self.count as u64)
            .filter_map(|c| u32::try_from(c).ok().and_then(char::from_u32))
    }
}

/// A parsed font borrowing its blob.
///
/// Parsing builds the block index once. It is lenient about a final block
/// whose glyph data is cut short: lookups inside the missing range fail
/// with [`FontError::MalformedFont`] instead of the whole font being
/// rejected.
#[derive(Debug, Clone)]
pub struct Font<'a> {
    data: &'a [u8],
    header: FontHeader,
    blocks: Vec<GlyphBlock>,
}

impl<'a> Font<'a> {
    /// Parse the header and block index of `data`.
    ///
    /// # Errors
    ///
    /// - [`FontError::MalformedFont`] if the header or a block header is cut
    ///   short.
    /// - [`FontError::ZeroGlyphSize`] if a glyph dimension is zero.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let header = parse_header(data)?;
        if header.glyph_width == 0 || header.glyph_height == 0 {
            return Err(FontError::ZeroGlyphSize {
                width: header.glyph_width,
                height: header.glyph_height,
            });
        }
        let glyph_len = header.bytes_per_glyph();

        let mut blocks = Vec::new();
        let mut pos = HEADER_LEN;
        while pos < data.len() {
            let Some(raw) = data.get(pos..pos + BLOCK_HEADER_LEN) else {
                return Err(FontError::MalformedFont {
                    what: "block header",
                    start: pos,
                    end: pos + BLOCK_HEADER_LEN,
                    len: data.len(),
                });
            };
            let block = GlyphBlock {
                first: u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]),
                count: raw[4],
                data_offset: pos + BLOCK_HEADER_LEN,
            };
            blocks.push(block);
            pos = block.data_offset + block.count as usize * glyph_len;
            if pos > data.len() {
                warn!(
                    target: target::FONT,
                    first = block.first,
                    count = block.count,
                    missing = pos - data.len(),
                    "font block glyph data truncated"
                );
            }
        }

        debug!(
            target: target::FONT,
            width = header.glyph_width,
            height = header.glyph_height,
            blocks = blocks.len(),
            "font parsed"
        );
        Ok(Self {
            data,
            header,
            blocks,
        })
    }

    /// Glyph dimensions.
    #[inline]
    pub const fn header(&self) -> FontHeader {
        self.header
    }

    /// Block index in file order.
    #[inline]
    pub fn blocks(&self) -> &[GlyphBlock] {
        &self.blocks
    }

    /// Every code point the font declares, in file order.
    ///
    /// A code point present in more than one block is yielded each time.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.blocks.iter().flat_map(|block| block.chars())
    }

    /// Packed data for `c`.
    ///
    /// # Errors
    ///
    /// - [`FontError::GlyphNotFound`] if no block contains `c`.
    /// - [`FontError::MalformedFont`] if the glyph's data runs past the blob.
    pub fn glyph(&self, c: char) -> Result<&'a [u8]> {
        let code = c as u32;
        let block = self
            .blocks
            .iter()
            .find(|b| b.contains(code))
            .ok_or(FontError::GlyphNotFound(c))?;

        let glyph_len = self.header.bytes_per_glyph();
        let start = block.data_offset + (code - block.first) as usize * glyph_len;
        let end = start + glyph_len;
        self.data
            .get(start..end)
            .ok_or(FontError::MalformedFont {
                what: "glyph data",
                start,
                end,
                len: self.data.len(),
            })
    }

    /// Decode the glyph for `c` into a bitmap.
    pub fn glyph_bitmap(&self, c: char) -> Result<Bitmap> {
        decode_glyph(self.header, self.glyph(c)?)
    }
}

/// Unpack glyph bytes into a `glyph_width`×`glyph_height` bitmap.
///
/// # Errors
///
/// - [`FontError::MalformedFont`] if `bytes` is shorter than one glyph.
/// - [`FontError::Raster`] if a glyph dimension is zero.
pub fn decode_glyph(header: FontHeader, bytes: &[u8]) -> Result<Bitmap> {
    let glyph_len = header.bytes_per_glyph();
    let Some(bytes) = bytes.get(..glyph_len) else {
        return Err(FontError::MalformedFont {
            what: "glyph data",
            start: 0,
            end: glyph_len,
            len: bytes.len(),
        });
    };

    let words: Vec<Word> = bytes
        .chunks(size_of::<Word>())
        .map(|chunk| {
            let mut le = [0u8; size_of::<Word>()];
            le[..chunk.len()].copy_from_slice(chunk);
            Word::from_le_bytes(le)
        })
        .collect();
    Ok(Bitmap::from_words(
        header.glyph_width as u32,
        header.glyph_height as u32,
        words,
    )?)
}

/// Pack a glyph bitmap into font bytes.
pub fn encode_glyph(glyph: &Bitmap) -> Vec<u8> {
    let glyph_len = glyph.pixel_count().div_ceil(8);
    let mut bytes: Vec<u8> = glyph.words().iter().flat_map(|w| w.to_le_bytes()).collect();
    bytes.truncate(glyph_len);
    bytes
}

/// Compiles glyph bitmaps into a font blob.
///
/// ```
/// use mraster_render::Bitmap;
/// use mraster_text::font::{Font, FontBuilder};
///
/// let mut builder = FontBuilder::new(3, 3);
/// builder.push_block('a', &[Bitmap::new(3, 3, true)]).unwrap();
/// let blob = builder.finish();
///
/// let font = Font::parse(&blob).unwrap();
/// assert_eq!(font.glyph('a').unwrap(), &[0xff, 0x01]);
/// ```
#[derive(Debug, Clone)]
pub struct FontBuilder {
    header: FontHeader,
    data: Vec<u8>,
}

impl FontBuilder {
    /// Start a font of `glyph_width`×`glyph_height` glyphs.
    pub fn new(glyph_width: u16, glyph_height: u16) -> Self {
        let mut data = Vec::with_capacity(HEADER_LEN);
        data.extend_from_slice(&glyph_width.to_le_bytes());
        data.extend_from_slice(&glyph_height.to_le_bytes());
        Self {
            header: FontHeader {
                glyph_width,
                glyph_height,
            },
            data,
        }
    }

    /// Append glyphs for consecutive code points starting at `first`.
    ///
    /// More than 255 glyphs are split over several blocks.
    ///
    /// # Errors
    ///
    /// [`FontError::GlyphSize`] if a glyph does not match the font's glyph
    /// size. Nothing is appended in that case.
    pub fn push_block(&mut self, first: char, glyphs: &[Bitmap]) -> Result<&mut Self> {
        let (w, h) = (self.header.glyph_width, self.header.glyph_height);
        for (i, glyph) in glyphs.iter().enumerate() {
            if glyph.width() != w as u32 || glyph.height() != h as u32 {
                return Err(FontError::GlyphSize {
                    ch: char::from_u32(first as u32 + i as u32)
                        .unwrap_or(char::REPLACEMENT_CHARACTER),
                    width: glyph.width(),
                    height: glyph.height(),
                    expected_width: w,
                    expected_height: h,
                });
            }
        }

        for (n, chunk) in glyphs.chunks(MAX_BLOCK_GLYPHS).enumerate() {
            let block_first = first as u32 + (n * MAX_BLOCK_GLYPHS) as u32;
            self.data.extend_from_slice(&block_first.to_le_bytes());
            self.data.push(chunk.len() as u8);
            for glyph in chunk {
                self.data.extend_from_slice(&encode_glyph(glyph));
            }
        }
        Ok(self)
    }

    /// The finished blob.
    pub fn finish(self) -> Vec<u8> {
        self.data
    }
}
