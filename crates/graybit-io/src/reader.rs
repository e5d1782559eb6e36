//! Bounds-checked big-endian reads at absolute offsets
//!
//! Every container parser in this crate reads fixed-offset fields through
//! [`ByteReader`]. A read that would run past the end of the data returns
//! [`IoError::TruncatedData`] instead of a short or garbage value, so call
//! sites never pre-validate lengths by hand.

use crate::{IoError, IoResult};

/// Read-only view over container bytes.
#[derive(Debug, Clone, Copy)]
pub struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Total length of the underlying data.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow `len` bytes starting at `offset`.
    pub fn bytes(&self, offset: usize, len: usize) -> IoResult<&'a [u8]> {
        let end = offset
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .ok_or(IoError::TruncatedData {
                offset,
                needed: len,
                available: self.data.len().saturating_sub(offset),
            })?;
        Ok(&self.data[offset..end])
    }

    /// Read a `u8` at `offset`.
    pub fn u8_at(&self, offset: usize) -> IoResult<u8> {
        Ok(self.bytes(offset, 1)?[0])
    }

    /// Read a big-endian `u16` at `offset`.
    pub fn u16_be_at(&self, offset: usize) -> IoResult<u16> {
        let b = self.bytes(offset, 2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    /// Read a big-endian `u32` at `offset`.
    pub fn u32_be_at(&self, offset: usize) -> IoResult<u32> {
        let b = self.bytes(offset, 4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}
