#![forbid(unsafe_code)]

//! Bitmap fonts and text layout for packed bitmaps.
//!
//! Fonts are compact binary blobs parsed by [`Font`]. For drawing, glyphs
//! are decoded once into a [`MonoFont`] table and placed with
//! [`layout_text`].

pub mod error;
pub mod font;
pub mod glyphs;
pub mod typeset;

pub use error::{FontError, Result};
pub use font::{Font, FontBuilder, FontHeader};
pub use glyphs::{FALLBACK_GLYPH, MonoFont};
pub use typeset::{TextLayout, layout_text, text_bitmap};
