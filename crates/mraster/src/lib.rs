#![forbid(unsafe_code)]

//! Monoraster public facade crate.
//!
//! Re-exports the packed bitmap, drawing, font and codec types from the
//! internal crates and offers a prelude for day-to-day use.

// --- Core re-exports -------------------------------------------------------

pub use mraster_core::clip::clip_line;
pub use mraster_core::geometry::{Point, Rect};

// --- Render re-exports -----------------------------------------------------

pub use mraster_render::{Bitmap, Draw, DrawFlags, RasterError, View, rle};

// --- Text re-exports -------------------------------------------------------

pub use mraster_text::{
    FALLBACK_GLYPH, Font, FontBuilder, FontError, FontHeader, MonoFont, TextLayout, layout_text,
    text_bitmap,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for monoraster.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Raster(#[from] RasterError),
    #[error(transparent)]
    Font(#[from] FontError),
    #[cfg(feature = "image")]
    #[error(transparent)]
    Export(#[from] mraster_extras::export::ExportError),
}

/// Standard result type for monoraster APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Bitmap, Draw, DrawFlags, Error, Font, MonoFont, Point, Rect, Result, TextLayout,
        layout_text,
    };

    #[cfg(feature = "image")]
    pub use mraster_extras::export::ImageExt;

    pub use crate::{core, render, text};
}

pub use mraster_core as core;
pub use mraster_render as render;
pub use mraster_text as text;

#[cfg(feature = "extras")]
pub use mraster_extras as extras;
