#![forbid(unsafe_code)]

//! Pre-decoded glyph tables.

use rustc_hash::FxHashMap;

use mraster_core::debug;
use mraster_core::logging::target;
use mraster_render::Bitmap;

use crate::error::{FontError, Result};
use crate::font::Font;

/// Glyph substituted for characters missing from a font.
pub const FALLBACK_GLYPH: char = '?';

/// Code point to glyph bitmap table with a fixed glyph size.
///
/// Text layout draws from this rather than from a [`Font`] so each glyph is
/// decoded once.
#[derive(Debug, Clone, Default)]
pub struct MonoFont {
    glyph_width: u16,
    glyph_height: u16,
    glyphs: FxHashMap<char, Bitmap>,
}

impl MonoFont {
    /// An empty table for `glyph_width`×`glyph_height` glyphs.
    pub fn new(glyph_width: u16, glyph_height: u16) -> Self {
        Self {
            glyph_width,
            glyph_height,
            glyphs: FxHashMap::default(),
        }
    }

    /// Decode every glyph in `font`.
    ///
    /// When a code point appears in several blocks the first one wins, as it
    /// does for [`Font::glyph`].
    ///
    /// # Errors
    ///
    /// Fails if any declared glyph's data is missing from the blob.
    pub fn from_font(font: &Font<'_>) -> Result<Self> {
        let header = font.header();
        let mut table = Self::new(header.glyph_width, header.glyph_height);
        for c in font.chars() {
            if table.glyphs.contains_key(&c) {
                continue;
            }
            table.glyphs.insert(c, font.glyph_bitmap(c)?);
        }
        debug!(target: target::FONT, glyphs = table.len(), "glyph table decoded");
        Ok(table)
    }

    /// Add or replace the glyph for `c`, returning the previous one.
    ///
    /// # Errors
    ///
    /// [`FontError::GlyphSize`] if `glyph` is not the table's glyph size.
    pub fn insert(&mut self, c: char, glyph: Bitmap) -> Result<Option<Bitmap>> {
        if glyph.width() != self.glyph_width as u32 || glyph.height() != self.glyph_height as u32 {
            return Err(FontError::GlyphSize {
                ch: c,
                width: glyph.width(),
                height: glyph.height(),
                expected_width: self.glyph_width,
                expected_height: self.glyph_height,
            });
        }
        Ok(self.glyphs.insert(c, glyph))
    }

    #[inline]
    pub const fn glyph_width(&self) -> u16 {
        self.glyph_width
    }

    #[inline]
    pub const fn glyph_height(&self) -> u16 {
        self.glyph_height
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    pub fn contains(&self, c: char) -> bool {
        self.glyphs.contains_key(&c)
    }

    /// The glyph for `c`, if present.
    pub fn get(&self, c: char) -> Option<&Bitmap> {
        self.glyphs.get(&c)
    }

    /// The glyph for `c`, or [`FALLBACK_GLYPH`]'s if `c` is missing.
    pub fn glyph_or_fallback(&self, c: char) -> Option<&Bitmap> {
        self.get(c).or_else(|| self.get(FALLBACK_GLYPH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FontBuilder;

    fn blob() -> Vec<u8> {
        let mut builder = FontBuilder::new(2, 2);
        builder
            .push_block(
                'a',
                &[
                    Bitmap::from_pattern(&["#.", ".."]),
                    Bitmap::from_pattern(&[".#", ".."]),
                ],
            )
            .unwrap()
            .push_block('a', &[Bitmap::new(2, 2, true)])
            .unwrap()
            .push_block('?', &[Bitmap::from_pattern(&["..", "##"])])
            .unwrap();
        builder.finish()
    }

    #[test]
    fn from_font_decodes_every_glyph() {
        let blob = blob();
        let font = Font::parse(&blob).unwrap();
        let table = MonoFont::from_font(&font).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!((table.glyph_width(), table.glyph_height()), (2, 2));
        assert_eq!(table.get('b').unwrap().to_string(), ".#\n..\n");
        // First block wins for the duplicated 'a'.
        assert_eq!(table.get('a').unwrap().to_string(), "#.\n..\n");
    }

    #[test]
    fn missing_glyphs_fall_back() {
        let blob = blob();
        let table = MonoFont::from_font(&Font::parse(&blob).unwrap()).unwrap();
        assert!(table.get('z').is_none());
        assert_eq!(table.glyph_or_fallback('z').unwrap().to_string(), "..\n##\n");
        assert!(MonoFont::new(2, 2).glyph_or_fallback('z').is_none());
    }

    #[test]
    fn truncated_font_fails_to_decode() {
        let blob = [1, 0, 1, 0, b'a', 0, 0, 0, 2, 1];
        let font = Font::parse(&blob).unwrap();
        assert!(matches!(
            MonoFont::from_font(&font),
            Err(FontError::MalformedFont { .. })
        ));
    }

    #[test]
    fn insert_checks_size() {
        let mut table = MonoFont::new(3, 3);
        assert!(table.insert('x', Bitmap::new(3, 3, true)).unwrap().is_none());
        assert!(table.insert('x', Bitmap::new(3, 3, false)).unwrap().is_some());
        assert!(table.insert('y', Bitmap::new(2, 3, false)).is_err());
        assert!(table.contains('x') && !table.contains('y'));
    }
}
