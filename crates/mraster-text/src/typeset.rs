#![forbid(unsafe_code)]

//! Monospaced text layout onto bitmaps.

use mraster_core::geometry::{Point, Rect};
use mraster_core::logging::target as log_target;
use mraster_core::{debug_span, trace};
use mraster_render::{Bitmap, DrawFlags};

use crate::glyphs::MonoFont;

/// How [`layout_text`] places glyphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextLayout {
    /// Distance in rows from the top of one line to the top of the next.
    /// `None` uses the glyph height plus one blank row.
    pub line_spacing: Option<u32>,
    /// Blank columns between consecutive glyphs.
    pub glyph_gap: u32,
    /// How glyph pixels are composited.
    pub flags: DrawFlags,
    /// Start a new line instead of running past the area's right edge.
    pub wrap: bool,
}

impl TextLayout {
    /// One blank row between lines, one blank column between glyphs,
    /// transparent background, no wrap.
    pub const fn new() -> Self {
        Self {
            line_spacing: None,
            glyph_gap: 1,
            flags: DrawFlags::ON_TRUE,
            wrap: false,
        }
    }

    /// Set the line advance in rows. Values below the glyph height make
    /// lines overlap.
    #[must_use]
    pub const fn line_spacing(mut self, rows: u32) -> Self {
        self.line_spacing = Some(rows);
        self
    }

    #[must_use]
    pub const fn glyph_gap(mut self, columns: u32) -> Self {
        self.glyph_gap = columns;
        self
    }

    #[must_use]
    pub const fn flags(mut self, flags: DrawFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub const fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Rows from one line's top to the next for glyphs `glyph_height` tall.
    pub const fn line_advance(&self, glyph_height: u16) -> u32 {
        match self.line_spacing {
            Some(rows) => rows,
            None => glyph_height as u32 + 1,
        }
    }
}

impl Default for TextLayout {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw `text` into `area` of `target`, starting at the area's top-left.
///
/// `\n` starts a new line. Characters missing from `font` are drawn with the
/// fallback glyph, or skipped if the font has none. Once a line would start
/// below `area`, the rest of the text is dropped.
///
/// Without wrapping, a line runs on past the right edge of `area` and is
/// only clipped by `target`. With wrapping, a glyph that would cross the
/// right edge moves to the next line, and glyphs wider than the whole area
/// are skipped.
///
/// Returns the bounding box of the glyph cells drawn, clipped to `target`,
/// or an empty rect at `area.min` if nothing landed on `target`.
pub fn layout_text(
    target: &mut Bitmap,
    text: &str,
    font: &MonoFont,
    area: Rect,
    layout: &TextLayout,
) -> Rect {
    let mut used = Rect::empty_at(area.min);
    if area.is_empty() {
        return used;
    }

    let span = debug_span!(target: log_target::LAYOUT, "layout_text", chars = text.len());
    let _guard = span.enter();

    let glyph_w = font.glyph_width() as u32;
    let glyph_h = font.glyph_height() as u32;
    let bounds = target.bounds();
    // The cursor is tracked in i64; positions outside i32 are never drawn.
    let advance_x = glyph_w as i64 + layout.glyph_gap as i64;
    let advance_y = layout.line_advance(font.glyph_height()) as i64;
    let (left, bottom) = (area.min.x as i64, area.max.y as i64);
    let fits = |x: i64| x + glyph_w as i64 - 1 <= area.max.x as i64;

    let (mut x, mut y) = (left, area.min.y as i64);
    for c in text.chars() {
        if c == '\n' {
            x = left;
            y += advance_y;
            if y > bottom {
                break;
            }
            continue;
        }

        let Some(glyph) = font.glyph_or_fallback(c) else {
            trace!(target: log_target::LAYOUT, ?c, "no glyph and no fallback, skipping");
            continue;
        };
        if !font.contains(c) {
            trace!(target: log_target::LAYOUT, ?c, "drawing fallback glyph");
        }

        if layout.wrap && !fits(x) {
            if x != left {
                x = left;
                y += advance_y;
                if y > bottom {
                    break;
                }
            }
            if !fits(x) {
                continue;
            }
        }

        // y never passes area.max.y, but x can run past i32 without wrap.
        if let (Ok(cx), Ok(cy)) = (i32::try_from(x), i32::try_from(y)) {
            let corner = Point::new(cx, cy);
            target.draw_bitmap(glyph, glyph.bounds(), corner, layout.flags);
            if let Some(cell) = Rect::at(corner, glyph_w, glyph_h).intersection_opt(&bounds) {
                used = used.union(&cell);
            }
        }
        x += advance_x;
    }

    used
}

/// Render `text` into a fresh `width`×`height` bitmap and crop it to the
/// pixels used.
///
/// Returns `None` if nothing was drawn.
///
/// # Panics
///
/// Panics if `width` or `height` is 0.
pub fn text_bitmap(
    text: &str,
    font: &MonoFont,
    width: u32,
    height: u32,
    layout: &TextLayout,
) -> Option<Bitmap> {
    let mut scratch = Bitmap::new(width, height, false);
    let area = scratch.bounds();
    let used = layout_text(&mut scratch, text, font, area, layout);
    scratch.crop(used)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x3 font: 'a' is a box outline, 'b' a plus, '?' a dot.
    fn font() -> MonoFont {
        let mut font = MonoFont::new(3, 3);
        font.insert('a', Bitmap::from_pattern(&["###", "#.#", "###"])).unwrap();
        font.insert('b', Bitmap::from_pattern(&[".#.", "###", ".#."])).unwrap();
        font.insert('?', Bitmap::from_pattern(&["...", ".#.", "..."])).unwrap();
        font
    }

    fn layout_full(target: &mut Bitmap, text: &str, layout: &TextLayout) -> Rect {
        let area = target.bounds();
        layout_text(target, text, &font(), area, layout)
    }

    #[test]
    fn single_line_with_gap() {
        let mut target = Bitmap::new(9, 3, false);
        let used = layout_full(&mut target, "ab", &TextLayout::new());
        assert_eq!(used, Rect::new(0, 0, 6, 2));
        assert_eq!(target.to_string(), "###..#...\n#.#.###..\n###..#...\n");
    }

    #[test]
    fn default_line_advance_leaves_one_blank_row() {
        let mut target = Bitmap::new(4, 8, false);
        let used = layout_full(&mut target, "a\nb", &TextLayout::new());
        assert_eq!(used, Rect::new(0, 0, 2, 6));
        assert!(target.get(1, 4) && target.get(0, 5) && !target.get(1, 3));
        assert_eq!(TextLayout::new().line_advance(3), 4);
    }

    #[test]
    fn line_spacing_is_the_line_advance() {
        let mut target = Bitmap::new(3, 6, false);
        let layout = TextLayout::new().line_spacing(3);
        let used = layout_full(&mut target, "a\na", &layout);
        assert_eq!(used, Rect::new(0, 0, 2, 5));
        assert_eq!(target.to_string(), "###\n#.#\n###\n###\n#.#\n###\n");

        let mut target = Bitmap::new(4, 8, false);
        let used = layout_full(&mut target, "a\nb", &TextLayout::new().line_spacing(5));
        assert_eq!(used, Rect::new(0, 0, 2, 7));
        assert!(target.get(1, 5) && target.get(0, 6) && !target.get(1, 4));
    }

    #[test]
    fn unknown_characters_use_fallback() {
        let mut target = Bitmap::new(3, 3, false);
        layout_full(&mut target, "z", &TextLayout::new());
        assert_eq!(target.to_string(), "...\n.#.\n...\n");

        let mut bare = MonoFont::new(3, 3);
        bare.insert('a', Bitmap::new(3, 3, true)).unwrap();
        let mut target = Bitmap::new(8, 3, false);
        let area = target.bounds();
        let used = layout_text(&mut target, "za", &bare, area, &TextLayout::new());
        // 'z' is skipped without advancing.
        assert_eq!(used, Rect::new(0, 0, 2, 2));
    }

    #[test]
    fn wrap_moves_glyph_to_next_line() {
        let mut target = Bitmap::new(7, 7, false);
        let used = layout_full(&mut target, "aab", &TextLayout::new().wrap(true));
        // Two glyphs fit in 7 columns, the third wraps.
        assert_eq!(used, Rect::new(0, 0, 6, 6));
        assert!(target.get(1, 5));
        assert!(!target.get(5, 5));
    }

    #[test]
    fn without_wrap_text_is_clipped_by_target() {
        let mut target = Bitmap::new(5, 3, false);
        let used = layout_full(&mut target, "aa", &TextLayout::new());
        assert_eq!(used, Rect::new(0, 0, 4, 2));
        assert_eq!(target.to_string(), "###.#\n#.#.#\n###.#\n");

        // A glyph entirely off the target does not count as used.
        let mut target = Bitmap::new(3, 3, false);
        let used = layout_full(&mut target, "ab", &TextLayout::new());
        assert_eq!(used, Rect::new(0, 0, 2, 2));
    }

    #[test]
    fn lines_below_area_are_dropped() {
        let mut target = Bitmap::new(3, 20, false);
        let area = Rect::new(0, 0, 2, 5);
        let used = layout_text(&mut target, "a\nb\na", &font(), area, &TextLayout::new());
        // Second line starts at y=4, inside the area; third at y=8 is dropped.
        assert_eq!(used, Rect::new(0, 0, 2, 6));
        assert_eq!(target.set_pixels().filter(|p| p.y >= 8).count(), 0);
    }

    #[test]
    fn too_wide_glyph_is_skipped_when_wrapping() {
        let mut target = Bitmap::new(8, 8, false);
        let area = Rect::new(0, 0, 1, 7);
        let layout = TextLayout::new().wrap(true);
        let used = layout_text(&mut target, "ab", &font(), area, &layout);
        assert!(used.is_empty());
        assert_eq!(used.min, area.min);
        assert_eq!(target.count_ones(), 0);
    }

    #[test]
    fn text_near_coordinate_limits_draws_nothing() {
        let mut target = Bitmap::new(8, 8, false);
        let area = Rect::new(i32::MAX - 4, i32::MAX - 6, i32::MAX, i32::MAX);
        for layout in [TextLayout::new(), TextLayout::new().wrap(true)] {
            let used = layout_text(&mut target, "aaaa\nbbbb", &font(), area, &layout);
            assert!(used.is_empty());
            assert_eq!(used.min, area.min);
        }
        let area = Rect::new(i32::MIN, 0, i32::MIN + 2, 2);
        let used = layout_text(&mut target, "ab", &font(), area, &TextLayout::new());
        assert!(used.is_empty());
        assert_eq!(target.count_ones(), 0);
    }

    #[test]
    fn empty_text_draws_nothing() {
        let mut target = Bitmap::new(4, 4, false);
        let area = Rect::new(1, 1, 3, 3);
        let used = layout_text(&mut target, "", &font(), area, &TextLayout::new());
        assert!(used.is_empty());
        assert_eq!(used.min, Point::new(1, 1));
    }

    #[test]
    fn inverted_opaque_layout() {
        let mut target = Bitmap::new(3, 3, false);
        let layout = TextLayout::new().flags(DrawFlags::OPAQUE | DrawFlags::INVERT);
        layout_full(&mut target, "b", &layout);
        assert_eq!(target.to_string(), "#.#\n...\n#.#\n");
    }

    #[test]
    fn text_bitmap_crops_to_content() {
        let bitmap = text_bitmap("ab\na", &font(), 32, 32, &TextLayout::new()).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (7, 7));
        assert!(text_bitmap("", &font(), 8, 8, &TextLayout::new()).is_none());
    }
}
