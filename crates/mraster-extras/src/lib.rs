#![forbid(unsafe_code)]

//! Feature-gated extras for monoraster.
//!
//! - `image`: conversion between bitmaps and RGBA images, LCD-style preview
//!   rendering, and bit-plane colour composition.
//! - `blocks`: rendering bitmaps as Unicode block characters for terminals.
//!
//! Everything here works through the public [`mraster_render::Bitmap`]
//! accessors; nothing touches packed storage directly.

#[cfg(feature = "blocks")]
pub mod blocks;
#[cfg(feature = "image")]
pub mod export;
