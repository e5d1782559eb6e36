//! graybit-test - Regression test framework and fixtures for graybit
//!
//! Provides [`RegParams`] for counting and reporting comparisons, plus
//! builders for synthetic GB7, PNG and JPEG inputs so tests need no image
//! files on disk.
//!
//! # Usage
//!
//! ```ignore
//! use graybit_test::{RegParams, fixtures};
//!
//! let mut rp = RegParams::new("gb7io");
//! let data = fixtures::gb7_bytes(2, 1, false, &[0x00, 0x7F]);
//! rp.compare_values(14.0, data.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: "compare" (default) or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Synthetic image inputs
pub mod fixtures {
    use crate::{TestError, TestResult};
    use graybit_core::PixelBuffer;

    pub use jpeg_encoder::ColorType as JpegColorType;
    pub use png::{BitDepth, ColorType as PngColorType};

    /// GB7 signature bytes
    pub const GB7_SIGNATURE: [u8; 4] = [0x47, 0x42, 0x37, 0x1D];

    /// Build a GB7 file: 12-byte header followed by `pixels` verbatim.
    ///
    /// `pixels` may be shorter or longer than `width * height` to exercise
    /// truncation and trailing data.
    pub fn gb7_bytes(width: u16, height: u16, mask: bool, pixels: &[u8]) -> Vec<u8> {
        let mut data = GB7_SIGNATURE.to_vec();
        data.push(0x01);
        data.push(mask as u8);
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(pixels);
        data
    }

    /// Signature plus a bare IHDR chunk (no CRC, no further chunks).
    pub fn png_ihdr_bytes(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Vec<u8> {
        let mut data = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        data.extend_from_slice(&13u32.to_be_bytes());
        data.extend_from_slice(b"IHDR");
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&[bit_depth, color_type, 0, 0, 0]);
        data
    }

    /// SOI, an APP0 segment and a frame header with the given marker.
    pub fn jpeg_with_sof(
        marker: u16,
        precision: u8,
        width: u16,
        height: u16,
        components: u8,
    ) -> Vec<u8> {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x07]);
        data.extend_from_slice(b"JFIF\0");
        data.extend_from_slice(&marker.to_be_bytes());
        data.extend_from_slice(&(8u16 + 3 * components as u16).to_be_bytes());
        data.push(precision);
        data.extend_from_slice(&height.to_be_bytes());
        data.extend_from_slice(&width.to_be_bytes());
        data.push(components);
        for id in 0..components {
            data.extend_from_slice(&[id + 1, 0x11, 0]);
        }
        data
    }

    /// Opaque RGBA gradient: red follows x, green follows y, blue mixes both.
    pub fn gradient_buffer(width: u32, height: u32) -> TestResult<PixelBuffer> {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for y in 0..height {
            for x in 0..width {
                let r = (x * 255 / width.saturating_sub(1).max(1)) as u8;
                let g = (y * 255 / height.saturating_sub(1).max(1)) as u8;
                data.extend_from_slice(&[r, g, r / 2 + g / 2, 255]);
            }
        }
        Ok(PixelBuffer::from_raw(width, height, data)?)
    }

    /// Encode raw samples as a PNG.
    pub fn encode_png(
        width: u32,
        height: u32,
        color_type: PngColorType,
        bit_depth: BitDepth,
        samples: &[u8],
    ) -> TestResult<Vec<u8>> {
        let encode_err = |e: png::EncodingError| TestError::Encode {
            format: "PNG",
            message: e.to_string(),
        };

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color_type);
            encoder.set_depth(bit_depth);
            let mut writer = encoder.write_header().map_err(encode_err)?;
            writer.write_image_data(samples).map_err(encode_err)?;
            writer.finish().map_err(encode_err)?;
        }
        Ok(out)
    }

    /// Encode palette indices as an indexed PNG.
    ///
    /// `palette` holds RGB triples; `indices` are packed rows at `bit_depth`.
    pub fn encode_png_indexed(
        width: u32,
        height: u32,
        bit_depth: BitDepth,
        palette: &[u8],
        indices: &[u8],
    ) -> TestResult<Vec<u8>> {
        let encode_err = |e: png::EncodingError| TestError::Encode {
            format: "PNG",
            message: e.to_string(),
        };

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(PngColorType::Indexed);
            encoder.set_depth(bit_depth);
            encoder.set_palette(palette.to_vec());
            let mut writer = encoder.write_header().map_err(encode_err)?;
            writer.write_image_data(indices).map_err(encode_err)?;
            writer.finish().map_err(encode_err)?;
        }
        Ok(out)
    }

    /// Encode an RGBA buffer as an 8-bit RGBA PNG.
    pub fn encode_png_rgba(pix: &PixelBuffer) -> TestResult<Vec<u8>> {
        encode_png(
            pix.width(),
            pix.height(),
            PngColorType::Rgba,
            BitDepth::Eight,
            pix.data(),
        )
    }

    /// Encode raw samples as a baseline JPEG.
    pub fn encode_jpeg(
        width: u32,
        height: u32,
        color_type: JpegColorType,
        samples: &[u8],
        quality: u8,
    ) -> TestResult<Vec<u8>> {
        let (w, h) = match (u16::try_from(width), u16::try_from(height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => {
                return Err(TestError::Dimension {
                    width,
                    height,
                    message: "JPEG dimensions are limited to 65535".to_string(),
                });
            }
        };

        let mut out = Vec::new();
        let encoder = jpeg_encoder::Encoder::new(&mut out, quality);
        encoder
            .encode(samples, w, h, color_type)
            .map_err(|e| TestError::Encode {
                format: "JPEG",
                message: e.to_string(),
            })?;
        Ok(out)
    }

    /// Encode the RGB channels of a buffer as a JPEG.
    pub fn encode_jpeg_rgb(pix: &PixelBuffer, quality: u8) -> TestResult<Vec<u8>> {
        let rgb: Vec<u8> = pix
            .data()
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect();
        encode_jpeg(pix.width(), pix.height(), JpegColorType::Rgb, &rgb, quality)
    }
}
