//! graybit Core - Basic data structures for the image viewer engine
//!
//! - [`PixelBuffer`] - RGBA8 pixel storage produced by every decoder and
//!   resampler
//! - [`ImageFormat`] - Container format tag (PNG, JPEG, GrayBit-7)
//! - [`Error`] - Violations of the buffer invariants

pub mod buffer;
pub mod error;
pub mod format;

pub use buffer::{BYTES_PER_PIXEL, PixelBuffer};
pub use error::{Error, Result};
pub use format::ImageFormat;

/// Alpha levels and gray pixel composition.
pub mod color {
    /// Fully opaque alpha.
    pub const OPAQUE: u8 = 255;
    /// Fully transparent alpha.
    pub const TRANSPARENT: u8 = 0;

    /// Compose a gray pixel with the given alpha.
    #[inline]
    pub fn gray(value: u8, alpha: u8) -> [u8; 4] {
        [value, value, value, alpha]
    }
}
