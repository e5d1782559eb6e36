//! PixelBuffer - The decoded image container
//!
//! Every decode and resample operation produces a `PixelBuffer`.
//!
//! # Pixel layout
//!
//! - 4 bytes per pixel, channel order R, G, B, A
//! - Row-major, no row padding
//! - The byte at `(y * width + x) * 4 + channel` holds one channel sample
//!
//! # Ownership model
//!
//! A buffer is allocated once, at its final size, by the operation that
//! produces it and is then handed to the caller. It is never resized.
//! Writers that split the work by rows use [`PixelBuffer::rows_mut`],
//! which hands out disjoint row slices.

use crate::error::{Error, Result};

/// Number of bytes per RGBA pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// RGBA8 pixel storage with its geometry.
///
/// Invariant: `data.len() == width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// Byte length of a `width x height` RGBA buffer, or `None` on overflow.
fn byte_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(BYTES_PER_PIXEL)
}

impl PixelBuffer {
    /// Create a zero-filled (transparent black) buffer.
    ///
    /// A zero width or height yields an empty buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if the byte size overflows.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = byte_len(width, height).ok_or(Error::InvalidDimension { width, height })?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Wrap existing RGBA8 data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSizeMismatch`] if `data` is not exactly
    /// `width * height * 4` bytes long.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = byte_len(width, height).ok_or(Error::InvalidDimension { width, height })?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True if the buffer holds no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA bytes. The length cannot change.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return the raw RGBA bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Bytes per row.
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Byte offset of pixel `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn pixel_index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL)
    }

    /// Get the RGBA value at `(x, y)`.
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.pixel_index(x, y)?;
        let p = &self.data[i..i + BYTES_PER_PIXEL];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Set the RGBA value at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_rgba(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<()> {
        let i = self.pixel_index(x, y).ok_or(Error::IndexOutOfBounds {
            index: y as usize * self.width as usize + x as usize,
            len: self.width as usize * self.height as usize,
        })?;
        self.data[i..i + BYTES_PER_PIXEL].copy_from_slice(&rgba);
        Ok(())
    }

    /// Borrow row `y`.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let stride = self.stride();
        let start = y as usize * stride;
        Some(&self.data[start..start + stride])
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks_exact panics on a zero chunk size
        self.data.chunks_exact(self.stride().max(1))
    }

    /// Iterate over disjoint mutable rows.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [u8]> {
        let stride = self.stride().max(1);
        self.data.chunks_exact_mut(stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let buf = PixelBuffer::new(3, 2).unwrap();
        assert_eq!(buf.dimensions(), (3, 2));
        assert_eq!(buf.data().len(), 3 * 2 * 4);
        assert!(buf.data().iter().all(|&b| b == 0));
        assert!(!buf.is_empty());
    }

    #[test]
    fn test_new_zero_size() {
        let buf = PixelBuffer::new(0, 5).unwrap();
        assert!(buf.is_empty());
        assert!(buf.data().is_empty());
        assert_eq!(buf.rows().count(), 0);
    }

    #[test]
    fn test_from_raw_checks_length() {
        let raw: Vec<u8> = (0..16).collect();
        let buf = PixelBuffer::from_raw(2, 2, raw.clone()).unwrap();
        assert_eq!(buf.get_rgba(1, 0), Some([4, 5, 6, 7]));
        assert_eq!(buf.into_raw(), raw);
        let err = PixelBuffer::from_raw(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            Error::BufferSizeMismatch {
                expected: 16,
                actual: 15
            }
        );
    }

    #[test]
    fn test_get_set_rgba() {
        let mut buf = PixelBuffer::new(4, 3).unwrap();
        buf.set_rgba(2, 1, [10, 20, 30, 40]).unwrap();
        assert_eq!(buf.get_rgba(2, 1), Some([10, 20, 30, 40]));
        assert_eq!(buf.pixel_index(2, 1), Some((4 + 2) * 4));
        assert_eq!(&buf.data()[24..28], &[10, 20, 30, 40]);
        assert_eq!(buf.get_rgba(4, 0), None);
        assert!(buf.set_rgba(0, 3, [0; 4]).is_err());
    }

    #[test]
    fn test_rows() {
        let mut buf = PixelBuffer::new(2, 3).unwrap();
        for (y, row) in buf.rows_mut().enumerate() {
            row.fill(y as u8);
        }
        assert_eq!(buf.rows().count(), 3);
        assert_eq!(buf.row(2).unwrap(), &[2u8; 8]);
        assert!(buf.row(3).is_none());
    }
}
