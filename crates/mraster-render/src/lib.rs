#![forbid(unsafe_code)]

//! Render kernel: packed bitmaps, drawing, compositing, transforms, and the
//! run-length codec.

pub mod bitmap;
pub mod composite;
pub mod draw;
pub mod error;
pub mod rle;
pub mod transform;
pub mod view;

pub use bitmap::Bitmap;
pub use composite::DrawFlags;
pub use draw::Draw;
pub use error::{RasterError, Result};
pub use view::View;
