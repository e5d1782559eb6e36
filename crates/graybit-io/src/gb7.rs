//! GrayBit-7 image format support
//!
//! GB7 stores one byte per pixel: the low 7 bits are a gray sample and bit 7
//! is a mask bit. The 12-byte header carries the mask flag and the geometry.
//!
//! # Layout
//!
//! | Offset | Size | Field |
//! |---|---|---|
//! | 5 | 1 | flags, bit 0 = mask present |
//! | 6 | 2 | width, big-endian |
//! | 8 | 2 | height, big-endian |
//! | 12 | width * height | pixel plane |
//!
//! Bytes 0..5 (signature and version) and 10..12 (reserved) are not
//! validated when decoding.

use crate::{IoResult, header::ImageHeader, reader::ByteReader};
use graybit_core::{ImageFormat, PixelBuffer, color};

const FLAGS_OFFSET: usize = 5;
const WIDTH_OFFSET: usize = 6;
const HEIGHT_OFFSET: usize = 8;
/// Start of the pixel plane
pub const PIXEL_OFFSET: usize = 12;

const MASK_FLAG: u8 = 0x01;
const GRAY_BITS: u8 = 0x7F;
const MASK_BIT_SHIFT: u8 = 7;

const DEPTH_GRAY: &str = "7-bit grayscale";
const DEPTH_GRAY_MASK: &str = "7-bit grayscale + 1-bit mask";

/// 7-bit gray to 8-bit gray: `round(g / 127 * 255)`.
///
/// `g * 255 / 127` never lands on a half, so adding 63 before the integer
/// division rounds to nearest.
const GRAY7_TO_8: [u8; 128] = {
    let mut lut = [0u8; 128];
    let mut g = 0;
    while g < 128 {
        lut[g] = ((g as u32 * 255 + 63) / 127) as u8;
        g += 1;
    }
    lut
};

/// Parsed GB7 header fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gb7Header {
    /// When set, bit 7 of every pixel byte selects opaque (1) or transparent (0)
    pub mask_flag: bool,
    pub width: u16,
    pub height: u16,
}

impl Gb7Header {
    /// Parse the header fields.
    pub fn parse(data: &[u8]) -> IoResult<Self> {
        let r = ByteReader::new(data);
        let flags = r.u8_at(FLAGS_OFFSET)?;
        Ok(Self {
            mask_flag: flags & MASK_FLAG != 0,
            width: r.u16_be_at(WIDTH_OFFSET)?,
            height: r.u16_be_at(HEIGHT_OFFSET)?,
        })
    }

    /// Number of bytes in the pixel plane.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn depth_description(&self) -> &'static str {
        if self.mask_flag {
            DEPTH_GRAY_MASK
        } else {
            DEPTH_GRAY
        }
    }

    /// 7 gray bits, plus the mask bit when it carries meaning.
    pub fn bits_per_pixel(&self) -> u32 {
        if self.mask_flag { 8 } else { 7 }
    }
}

/// A decoded GB7 image, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gb7Image {
    pub width: u32,
    pub height: u32,
    pub depth_description: &'static str,
    pub buffer: PixelBuffer,
}

/// Convert one GB7 pixel byte to RGBA.
#[inline]
pub fn gb7_pixel_to_rgba(byte: u8, mask_flag: bool) -> [u8; 4] {
    let gray = GRAY7_TO_8[(byte & GRAY_BITS) as usize];
    let alpha = if !mask_flag || (byte >> MASK_BIT_SHIFT) & 0x01 == 1 {
        color::OPAQUE
    } else {
        color::TRANSPARENT
    };
    color::gray(gray, alpha)
}

/// Read GB7 header metadata without decoding pixel data
pub fn read_header_gb7(data: &[u8]) -> IoResult<ImageHeader> {
    let header = Gb7Header::parse(data)?;
    Ok(ImageHeader {
        width: header.width as u32,
        height: header.height as u32,
        depth_description: header.depth_description().to_string(),
        bits_per_pixel: Some(header.bits_per_pixel()),
        format: ImageFormat::Gb7,
    })
}

/// Decode a GB7 image into an RGBA buffer.
///
/// # Errors
///
/// Returns [`crate::IoError::TruncatedData`] if the data is shorter than
/// `12 + width * height` bytes. No partial buffer is produced.
pub fn read_gb7(data: &[u8]) -> IoResult<Gb7Image> {
    let header = Gb7Header::parse(data)?;
    let count = header.pixel_count();
    let plane = ByteReader::new(data).bytes(PIXEL_OFFSET, count)?;

    let width = header.width as u32;
    let height = header.height as u32;
    let mut buffer = PixelBuffer::new(width, height)?;
    for (dst, &src) in buffer.data_mut().chunks_exact_mut(4).zip(plane) {
        dst.copy_from_slice(&gb7_pixel_to_rgba(src, header.mask_flag));
    }

    log::debug!(
        "gb7: decoded {}x{} ({})",
        width,
        height,
        header.depth_description()
    );

    Ok(Gb7Image {
        width,
        height,
        depth_description: header.depth_description(),
        buffer,
    })
}
