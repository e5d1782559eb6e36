//! Error types for the test framework

use thiserror::Error;

/// Errors that can occur while building test fixtures
#[derive(Debug, Error)]
pub enum TestError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] graybit_core::Error),

    /// Failed to encode a fixture image
    #[error("failed to encode {format} fixture: {message}")]
    Encode {
        format: &'static str,
        message: String,
    },

    /// Fixture geometry does not fit the target container
    #[error("fixture size {width}x{height} not representable: {message}")]
    Dimension {
        width: u32,
        height: u32,
        message: String,
    },
}

/// Result type for test operations
pub type TestResult<T> = Result<T, TestError>;
