#![forbid(unsafe_code)]

//! Error type for raster construction and decoding.

/// Errors raised by bitmap construction and the run-length codec.
///
/// There is no out-of-range variant: reads outside the
/// bitmap return `false` and writes are ignored.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RasterError {
    /// A bitmap was requested with a zero dimension.
    #[error("bitmap dimensions must be non-zero, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },

    /// Raw word storage does not match the requested dimensions.
    #[error("a {width}x{height} bitmap needs {expected} words, got {actual}")]
    WordCount {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Run-length input ran out before every pixel was written.
    #[error("run-length data ended after {decoded} of {total} pixels")]
    TruncatedData { decoded: usize, total: usize },
}

/// Result alias for raster operations.
pub type Result<T> = std::result::Result<T, RasterError>;
