//! Image header reading
//!
//! Provides metadata extraction from image files without decoding pixel data.
//! The status line of the viewer shows geometry and a color-depth
//! description taken from here.

use crate::{IoError, IoResult, detect_format_from_bytes};
use graybit_core::ImageFormat;
use std::path::Path;

/// Image metadata read without decoding pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHeader {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Human-readable color depth, e.g. "24-bit RGB"
    pub depth_description: String,
    /// Total encoded bits per pixel; `None` for unrecognized color layouts
    pub bits_per_pixel: Option<u32>,
    /// Container the header was read from
    pub format: ImageFormat,
}

/// Read image metadata from a file path without decoding pixel data
///
/// The format is chosen from the extension, falling back to magic bytes.
pub fn read_image_header<P: AsRef<Path>>(path: P) -> IoResult<ImageHeader> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    match ImageFormat::from_path(path) {
        Some(format) => read_header_for_format(&data, format),
        None => read_image_header_mem(&data),
    }
}

/// Read image metadata from bytes without decoding pixel data
pub fn read_image_header_mem(data: &[u8]) -> IoResult<ImageHeader> {
    let format = detect_format_from_bytes(data)?;
    read_header_for_format(data, format)
}

/// Read header for a specific format
pub fn read_header_for_format(data: &[u8], format: ImageFormat) -> IoResult<ImageHeader> {
    match format {
        ImageFormat::Png => crate::png::read_header_png(data),
        ImageFormat::Jpeg => crate::jpeg::read_header_jpeg(data),
        ImageFormat::Gb7 => crate::gb7::read_header_gb7(data),
        ImageFormat::Unknown => Err(IoError::UnsupportedFormat(format!("{:?}", format))),
    }
}
