#![forbid(unsafe_code)]

//! Core: geometry primitives, Cohen–Sutherland line clipping, and logging.

pub mod clip;
pub mod geometry;
pub mod logging;

#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
