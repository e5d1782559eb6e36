//! PNG image format support
//!
//! Header inspection reads the IHDR chunk directly from the container
//! bytes. Pixel decoding is delegated to the `png` crate (feature
//! `png-format`) and normalized to RGBA8.

use crate::{IoError, IoResult, format::magic, header::ImageHeader, reader::ByteReader};
use graybit_core::ImageFormat;

/// IHDR is required to be the first chunk, right after the signature
const IHDR_OFFSET: usize = 8;
const IHDR_TYPE_OFFSET: usize = IHDR_OFFSET + 4;
const IHDR_WIDTH_OFFSET: usize = IHDR_OFFSET + 8;
const IHDR_HEIGHT_OFFSET: usize = IHDR_OFFSET + 12;
const IHDR_BIT_DEPTH_OFFSET: usize = IHDR_OFFSET + 16;
const IHDR_COLOR_TYPE_OFFSET: usize = IHDR_OFFSET + 17;

/// Derive `(bits_per_pixel, description)` from the IHDR color type.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedVariant`] for color types outside the PNG
/// set (0, 2, 3, 4, 6).
pub fn color_layout(color_type: u8, bit_depth: u8) -> IoResult<(u32, String)> {
    let depth = bit_depth as u32;
    let (bpp, kind) = match color_type {
        0 => (depth, "grayscale"),
        2 => (depth * 3, "RGB"),
        3 => (depth, "indexed"),
        4 => (depth * 2, "grayscale+alpha"),
        6 => (depth * 4, "RGBA"),
        _ => {
            return Err(IoError::UnsupportedVariant(format!(
                "PNG color type {color_type}"
            )));
        }
    };
    Ok((bpp, format!("{bpp}-bit {kind}")))
}

/// Read PNG header metadata without decoding pixel data
///
/// # Errors
///
/// - [`IoError::Format`] on a bad signature or if IHDR is not the first chunk
/// - [`IoError::TruncatedData`] if the IHDR fields run past the end of `data`
pub fn read_header_png(data: &[u8]) -> IoResult<ImageHeader> {
    if !data.starts_with(magic::PNG) {
        return Err(IoError::format(0, "invalid PNG signature"));
    }

    let r = ByteReader::new(data);
    let chunk_type = r.bytes(IHDR_TYPE_OFFSET, 4)?;
    if chunk_type != b"IHDR" {
        return Err(IoError::format(
            IHDR_TYPE_OFFSET,
            format!(
                "expected IHDR chunk, found {:?}",
                String::from_utf8_lossy(chunk_type)
            ),
        ));
    }

    let width = r.u32_be_at(IHDR_WIDTH_OFFSET)?;
    let height = r.u32_be_at(IHDR_HEIGHT_OFFSET)?;
    let bit_depth = r.u8_at(IHDR_BIT_DEPTH_OFFSET)?;
    let color_type = r.u8_at(IHDR_COLOR_TYPE_OFFSET)?;

    let (bits_per_pixel, depth_description) = match color_layout(color_type, bit_depth) {
        Ok((bpp, desc)) => (Some(bpp), desc),
        Err(e) => {
            log::debug!("png: {e}, reporting generic depth");
            (
                None,
                format!("PNG (color type {color_type}, {bit_depth} bits per channel)"),
            )
        }
    };

    log::debug!("png: header {width}x{height} ({depth_description})");

    Ok(ImageHeader {
        width,
        height,
        depth_description,
        bits_per_pixel,
        format: ImageFormat::Png,
    })
}

#[cfg(feature = "png-format")]
pub use self::codec::read_png;

#[cfg(feature = "png-format")]
mod codec {
    use crate::{IoError, IoResult};
    use graybit_core::PixelBuffer;
    use png::{BitDepth, ColorType, Decoder, Transformations};
    use std::io::Cursor;

    /// Decode PNG pixel data to RGBA8.
    ///
    /// Palettes and sub-byte depths are expanded and 16-bit samples are
    /// stripped to 8 bits before conversion.
    pub fn read_png(data: &[u8]) -> IoResult<PixelBuffer> {
        let mut decoder = Decoder::new(Cursor::new(data));
        decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e| IoError::Codec(format!("PNG decode error: {}", e)))?;

        let buf_size = reader
            .output_buffer_size()
            .ok_or_else(|| IoError::Codec("failed to get output buffer size".to_string()))?;
        let mut buf = vec![0; buf_size];
        let output_info = reader
            .next_frame(&mut buf)
            .map_err(|e| IoError::Codec(format!("PNG frame error: {}", e)))?;

        let width = output_info.width;
        let height = output_info.height;
        let line_size = output_info.line_size;
        let samples = match (output_info.color_type, output_info.bit_depth) {
            (ColorType::Grayscale, BitDepth::Eight) => 1,
            (ColorType::GrayscaleAlpha, BitDepth::Eight) => 2,
            (ColorType::Rgb, BitDepth::Eight) => 3,
            (ColorType::Rgba, BitDepth::Eight) => 4,
            (color_type, bit_depth) => {
                return Err(IoError::UnsupportedVariant(format!(
                    "PNG output {:?} {:?}",
                    color_type, bit_depth
                )));
            }
        };

        let mut pix = PixelBuffer::new(width, height)?;
        for (y, dst_row) in pix.rows_mut().enumerate() {
            let src_row = &buf[y * line_size..y * line_size + width as usize * samples];
            for (dst, src) in dst_row
                .chunks_exact_mut(4)
                .zip(src_row.chunks_exact(samples))
            {
                let rgba = match *src {
                    [g] => [g, g, g, 255],
                    [g, a] => [g, g, g, a],
                    [r, g, b] => [r, g, b, 255],
                    [r, g, b, a] => [r, g, b, a],
                    _ => unreachable!("samples is 1..=4"),
                };
                dst.copy_from_slice(&rgba);
            }
        }

        Ok(pix)
    }
}
