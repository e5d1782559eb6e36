//! Error types for graybit-transform

use thiserror::Error;

/// Errors that can occur during resampling and display scaling
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ResampleError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] graybit_core::Error),

    /// Target dimensions must both be positive
    #[error("invalid target size: {width}x{height}")]
    InvalidTarget { width: i64, height: i64 },

    /// Source has no pixels to sample from
    #[error("cannot resample an empty {width}x{height} image")]
    EmptySource { width: u32, height: u32 },

    /// Display scale must be finite and positive
    #[error("invalid scale factor: {0}")]
    InvalidScale(f64),

    /// Unrecognized resampling method name
    #[error("unknown resampling method: {0}")]
    UnknownMethod(String),
}

/// Result type for resampling operations
pub type ResampleResult<T> = Result<T, ResampleError>;
