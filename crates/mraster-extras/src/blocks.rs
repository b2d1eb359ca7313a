#![forbid(unsafe_code)]

//! Terminal rendering with Unicode block characters.
//!
//! A bitmap is turned into a string of block characters, optionally framed
//! with a double-line border and coloured with 16-colour ANSI SGR codes.
//! Rendering is a pure function of the bitmap and a [`BlockStyle`]; nothing
//! is written to the terminal here.
//!
//! | Mode | Pixels per character | Characters |
//! |------|----------------------|------------|
//! | [`BlockMode::Full`] | 1×1 | `█` |
//! | [`BlockMode::Half`] | 1×2 | `▀ ▄ █` |
//! | [`BlockMode::Quad`] | 2×2 | `▘ ▝ ▀ ▖ ▌ ▞ ▛ ▗ ▚ ▐ ▜ ▄ ▙ ▟ █` |

use mraster_render::Bitmap;

/// Full terminal reset (RIS), which also clears the screen.
pub const CLEAR_SCREEN: &str = "\x1bc";

/// SGR reset.
pub const SGR_RESET: &str = "\x1b[0m";

const HALF_BLOCKS: [char; 4] = [' ', '▀', '▄', '█'];

/// Indexed by `tl | tr << 1 | bl << 2 | br << 3`.
const QUAD_BLOCKS: [char; 16] = [
    ' ', '▘', '▝', '▀', //
    '▖', '▌', '▞', '▛', //
    '▗', '▚', '▐', '▜', //
    '▄', '▙', '▟', '█',
];

/// How many pixels each character covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BlockMode {
    /// One pixel per character.
    Full,
    /// Two vertically stacked pixels per character.
    #[default]
    Half,
    /// A 2×2 pixel quad per character.
    Quad,
}

impl BlockMode {
    /// Pixels covered by one character, as (columns, rows).
    pub const fn cell_size(self) -> (u32, u32) {
        match self {
            Self::Full => (1, 1),
            Self::Half => (1, 2),
            Self::Quad => (2, 2),
        }
    }

    /// Characters needed for `bitmap`, as (columns, rows).
    pub fn grid_size(self, bitmap: &Bitmap) -> (u32, u32) {
        let (cw, ch) = self.cell_size();
        (bitmap.width().div_ceil(cw), bitmap.height().div_ceil(ch))
    }

    fn cell(self, bitmap: &Bitmap, x: i32, y: i32) -> char {
        match self {
            Self::Full => {
                if bitmap.get(x, y) {
                    '█'
                } else {
                    ' '
                }
            }
            Self::Half => {
                let index = bitmap.get(x, y) as usize | (bitmap.get(x, y + 1) as usize) << 1;
                HALF_BLOCKS[index]
            }
            Self::Quad => {
                let index = bitmap.get(x, y) as usize
                    | (bitmap.get(x + 1, y) as usize) << 1
                    | (bitmap.get(x, y + 1) as usize) << 2
                    | (bitmap.get(x + 1, y + 1) as usize) << 3;
                QUAD_BLOCKS[index]
            }
        }
    }
}

/// The 16 standard ANSI colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnsiColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Purple,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightPurple,
    BrightCyan,
    BrightWhite,
}

impl AnsiColor {
    /// Palette index, 0..16.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// SGR foreground sequence: codes 30-37, or 90-97 for bright colours.
    pub fn fg_sgr(self) -> String {
        let index = self.index();
        let code = if index < 8 { 30 + index } else { 90 + index - 8 };
        format!("\x1b[{code}m")
    }
}

/// Framing and colours for [`render_blocks`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockStyle {
    /// Emit [`CLEAR_SCREEN`] first.
    pub clear: bool,
    /// Frame the picture with a double-line border.
    pub border: bool,
    pub border_color: Option<AnsiColor>,
    pub text_color: Option<AnsiColor>,
}

impl BlockStyle {
    /// No clear, no border, terminal default colours.
    pub const fn new() -> Self {
        Self {
            clear: false,
            border: false,
            border_color: None,
            text_color: None,
        }
    }

    #[must_use]
    pub const fn clear(mut self, clear: bool) -> Self {
        self.clear = clear;
        self
    }

    #[must_use]
    pub const fn border(mut self, border: bool) -> Self {
        self.border = border;
        self
    }

    #[must_use]
    pub const fn border_color(mut self, color: AnsiColor) -> Self {
        self.border_color = Some(color);
        self
    }

    #[must_use]
    pub const fn text_color(mut self, color: AnsiColor) -> Self {
        self.text_color = Some(color);
        self
    }

    fn push_border(
        &self,
        out: &mut String,
        left: char,
        fill: Option<(char, u32)>,
        right: Option<char>,
    ) {
        if let Some(color) = self.border_color {
            out.push_str(&color.fg_sgr());
        }
        out.push(left);
        if let Some((c, n)) = fill {
            out.extend(std::iter::repeat_n(c, n as usize));
        }
        if let Some(right) = right {
            out.push(right);
        }
        if self.border_color.is_some() {
            out.push_str(SGR_RESET);
        }
    }
}

/// Render `bitmap` as block characters, one line per character row.
///
/// Every line, including the last, ends with `\n`. Pixels past the bitmap's
/// edges in partially covered cells count as unset.
pub fn render_blocks(bitmap: &Bitmap, mode: BlockMode, style: &BlockStyle) -> String {
    let (cols, rows) = mode.grid_size(bitmap);
    let (cw, ch) = mode.cell_size();
    let mut out = String::with_capacity(((cols + 4) * (rows + 2) * 3) as usize);

    if style.clear {
        out.push_str(CLEAR_SCREEN);
    }
    if style.border {
        style.push_border(&mut out, '╔', Some(('═', cols)), Some('╗'));
        out.push('\n');
    }

    for row in 0..rows {
        if style.border {
            style.push_border(&mut out, '║', None, None);
        }
        if let Some(color) = style.text_color {
            out.push_str(&color.fg_sgr());
        }
        let y = (row * ch) as i32;
        for col in 0..cols {
            out.push(mode.cell(bitmap, (col * cw) as i32, y));
        }
        if style.text_color.is_some() {
            out.push_str(SGR_RESET);
        }
        if style.border {
            style.push_border(&mut out, '║', None, None);
        }
        out.push('\n');
    }

    if style.border {
        style.push_border(&mut out, '╚', Some(('═', cols)), Some('╝'));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bitmap {
        Bitmap::from_pattern(&["#..", "##.", "..#"])
    }

    #[test]
    fn full_blocks() {
        let out = render_blocks(&sample(), BlockMode::Full, &BlockStyle::new());
        assert_eq!(out, "█  \n██ \n  █\n");
    }

    #[test]
    fn half_blocks_pad_missing_row() {
        let out = render_blocks(&sample(), BlockMode::Half, &BlockStyle::new());
        assert_eq!(out, "█▄ \n  ▀\n");
    }

    #[test]
    fn quad_blocks() {
        let out = render_blocks(&sample(), BlockMode::Quad, &BlockStyle::new());
        assert_eq!(out, "▙ \n ▘\n");
    }

    #[test]
    fn every_quad_pattern() {
        for (index, expected) in QUAD_BLOCKS.iter().enumerate() {
            let mut bitmap = Bitmap::new(2, 2, false);
            bitmap.set(0, 0, index & 1 != 0);
            bitmap.set(1, 0, index & 2 != 0);
            bitmap.set(0, 1, index & 4 != 0);
            bitmap.set(1, 1, index & 8 != 0);
            let out = render_blocks(&bitmap, BlockMode::Quad, &BlockStyle::new());
            assert_eq!(out, format!("{expected}\n"), "index {index}");
        }
    }

    #[test]
    fn border_frames_the_grid() {
        let bitmap = Bitmap::new(2, 1, true);
        let out = render_blocks(&bitmap, BlockMode::Full, &BlockStyle::new().border(true));
        assert_eq!(out, "╔══╗\n║██║\n╚══╝\n");
    }

    #[test]
    fn colours_wrap_border_and_text() {
        let bitmap = Bitmap::new(1, 1, true);
        let style = BlockStyle::new()
            .clear(true)
            .border(true)
            .border_color(AnsiColor::Blue)
            .text_color(AnsiColor::BrightGreen);
        let out = render_blocks(&bitmap, BlockMode::Full, &style);
        let blue = "\x1b[34m";
        let green = "\x1b[92m";
        let reset = SGR_RESET;
        assert_eq!(
            out,
            format!(
                "\x1bc{blue}╔═╗{reset}\n\
                 {blue}║{reset}{green}█{reset}{blue}║{reset}\n\
                 {blue}╚═╝{reset}\n"
            )
        );
    }

    #[test]
    fn ansi_codes() {
        assert_eq!(AnsiColor::Black.fg_sgr(), "\x1b[30m");
        assert_eq!(AnsiColor::White.fg_sgr(), "\x1b[37m");
        assert_eq!(AnsiColor::BrightBlack.fg_sgr(), "\x1b[90m");
        assert_eq!(AnsiColor::BrightWhite.index(), 15);
    }

    #[test]
    fn grid_size_rounds_up() {
        let bitmap = Bitmap::new(5, 5, false);
        assert_eq!(BlockMode::Full.grid_size(&bitmap), (5, 5));
        assert_eq!(BlockMode::Half.grid_size(&bitmap), (5, 3));
        assert_eq!(BlockMode::Quad.grid_size(&bitmap), (3, 3));
    }
}
