#![forbid(unsafe_code)]

//! Structured log events for the raster engine.
//!
//! Every event is emitted under one of the [`target`] names so subscribers
//! can filter per subsystem, e.g. `RUST_LOG=mraster::font=debug`.
//!
//! The `tracing` feature switches the macros between the real `tracing`
//! ones and silent stand-ins that accept the same syntax, including
//! `target:` and `?field` arguments. Per-pixel paths emit nothing.

/// Log targets, one per subsystem.
pub mod target {
    /// Rotation and flips.
    pub const TRANSFORM: &str = "mraster::transform";
    /// Viewport extraction.
    pub const VIEW: &str = "mraster::view";
    /// Run-length encoding and decoding.
    pub const RLE: &str = "mraster::rle";
    /// Font blob parsing and glyph tables.
    pub const FONT: &str = "mraster::font";
    /// Text layout.
    pub const LAYOUT: &str = "mraster::layout";
    /// Image import and export.
    pub const EXPORT: &str = "mraster::export";

    /// All targets, for subscriber setup.
    pub const ALL: [&str; 6] = [TRANSFORM, VIEW, RLE, FONT, LAYOUT, EXPORT];
}

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, warn};

#[cfg(not(feature = "tracing"))]
mod silent {
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// Evaluates to a [`SilentSpan`](crate::logging::SilentSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::SilentSpan
        };
    }
}

/// Stand-in for `tracing::Span` when the `tracing` feature is off.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSpan;

#[cfg(not(feature = "tracing"))]
impl SilentSpan {
    pub fn enter(&self) -> SilentGuard {
        SilentGuard
    }

    /// Run `f` "inside" the span.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        f()
    }
}

/// Returned by [`SilentSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct SilentGuard;
