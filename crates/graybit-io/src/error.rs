//! I/O error types
//!
//! Provides a unified error type for decoding and header inspection.
//! Parse failures carry the byte offset at which they were detected and,
//! where it applies, the expected and actual values.

use thiserror::Error;

/// Error type for image I/O operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not recognized or not enabled via features
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Not enough data to even identify the container
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// Bad magic/signature or a missing required marker or chunk
    #[error("format error at offset {offset}: {message}")]
    Format { offset: usize, message: String },

    /// A declared extent runs past the end of the buffer
    #[error(
        "truncated data at offset {offset}: needed {needed} bytes, {available} available"
    )]
    TruncatedData {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Recognized container with an unrecognized color or component layout
    #[error("unsupported variant: {0}")]
    UnsupportedVariant(String),

    /// A pixel codec returned an error
    #[error("codec error: {0}")]
    Codec(String),

    /// An error from the core library (e.g. buffer size mismatch)
    #[error("core error: {0}")]
    Core(#[from] graybit_core::Error),
}

impl IoError {
    pub(crate) fn format(offset: usize, message: impl Into<String>) -> Self {
        Self::Format {
            offset,
            message: message.into(),
        }
    }
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
