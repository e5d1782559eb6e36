//! Image format detection
//!
//! Detects image formats by examining magic numbers in the file header.
//! The viewer normally picks the format from the file extension; magic
//! detection is the fallback for paths without a recognized extension.

use crate::{IoError, IoResult};
use graybit_core::ImageFormat;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Magic numbers for image format detection
pub(crate) mod magic {
    /// PNG: 89 50 4E 47 0D 0A 1A 0A
    pub const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    /// JPEG SOI followed by the first marker's FF
    pub const JPEG: &[u8] = &[0xFF, 0xD8, 0xFF];

    /// GrayBit-7: "GB7" followed by 0x1D
    pub const GB7: &[u8] = &[0x47, 0x42, 0x37, 0x1D];
}

/// Detect image format from a file path
pub fn detect_format<P: AsRef<Path>>(path: P) -> IoResult<ImageFormat> {
    let mut file = File::open(path)?;
    let mut header = [0u8; 12];
    let bytes_read = file.read(&mut header)?;
    detect_format_from_bytes(&header[..bytes_read])
}

/// Detect image format from bytes
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if data.starts_with(magic::PNG) {
        return Ok(ImageFormat::Png);
    }

    if data.starts_with(magic::JPEG) {
        return Ok(ImageFormat::Jpeg);
    }

    if data.starts_with(magic::GB7) {
        return Ok(ImageFormat::Gb7);
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}
