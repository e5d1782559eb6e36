//! graybit-io - Image decoding and header inspection
//!
//! - GrayBit-7 (`.gb7`): full decode to RGBA ([`read_gb7`])
//! - PNG / JPEG: header-only metadata ([`read_header_png`],
//!   [`read_header_jpeg`]); pixels come from the `png` and `jpeg-decoder`
//!   crates behind the `png-format` and `jpeg` features
//! - [`read_image_mem`] / [`read_image`]: dispatch by format and return
//!   metadata together with the RGBA buffer

mod error;
pub mod format;
pub mod gb7;
pub mod header;
pub mod jpeg;
pub mod png;
pub mod reader;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use gb7::{Gb7Header, Gb7Image, read_gb7, read_header_gb7};
pub use graybit_core::ImageFormat;
pub use header::{ImageHeader, read_header_for_format, read_image_header, read_image_header_mem};
pub use jpeg::read_header_jpeg;
pub use png::read_header_png;
pub use reader::ByteReader;

use graybit_core::PixelBuffer;
use std::path::Path;

/// A decoded image together with its container metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub header: ImageHeader,
    pub buffer: PixelBuffer,
}

/// Read and decode an image file.
///
/// The format is chosen from the file extension, falling back to the magic
/// bytes when the extension is missing or unknown.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<LoadedImage> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    let format = match ImageFormat::from_path(path) {
        Some(format) => format,
        None => detect_format_from_bytes(&data)?,
    };
    read_image_mem(&data, format)
}

/// Decode image bytes of a known format.
///
/// GB7 goes through the built-in decoder. PNG and JPEG metadata come from
/// the header inspectors and their pixels from the codec adapters; a codec
/// whose output geometry disagrees with the header is reported as
/// [`IoError::Codec`].
pub fn read_image_mem(data: &[u8], format: ImageFormat) -> IoResult<LoadedImage> {
    if format == ImageFormat::Gb7 {
        let header = read_header_gb7(data)?;
        let image = read_gb7(data)?;
        return Ok(LoadedImage {
            header,
            buffer: image.buffer,
        });
    }

    let header = read_header_for_format(data, format)?;
    let buffer = decode_pixels(data, format)?;
    if buffer.dimensions() != (header.width, header.height) {
        return Err(IoError::Codec(format!(
            "{} decoder produced {}x{}, header declares {}x{}",
            format.name(),
            buffer.width(),
            buffer.height(),
            header.width,
            header.height
        )));
    }
    Ok(LoadedImage { header, buffer })
}

fn decode_pixels(data: &[u8], format: ImageFormat) -> IoResult<PixelBuffer> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(data),

        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(data),

        _ => Err(IoError::UnsupportedFormat(format!(
            "{:?} pixel decoding not enabled",
            format
        ))),
    }
}
