//! Error types for graybit-core
//!
//! Covers the invariants of the pixel storage: buffer sizes that overflow,
//! raw data of the wrong length, and out-of-range pixel coordinates.

use thiserror::Error;

/// graybit-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `width * height * 4` does not fit in memory addressing
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Raw pixel data does not match the declared geometry
    #[error("pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
