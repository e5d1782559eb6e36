//! JPEG image format support
//!
//! Header inspection walks the marker segments after SOI until it reaches a
//! Start-Of-Frame and reads the frame geometry from it. Pixel decoding is
//! delegated to the `jpeg-decoder` crate (feature `jpeg`).

use crate::{IoError, IoResult, header::ImageHeader, reader::ByteReader};
use graybit_core::ImageFormat;

const MARKER_SOI: u16 = 0xFFD8;
const MARKER_SOF_FIRST: u16 = 0xFFC0;
const MARKER_SOF_LAST: u16 = 0xFFCF;
/// Define Huffman Table, inside the SOF range but not a frame
const MARKER_DHT: u16 = 0xFFC4;
/// Reserved JPEG extension
const MARKER_JPG: u16 = 0xFFC8;
/// Define Arithmetic Coding conditioning
const MARKER_DAC: u16 = 0xFFCC;

// SOF field offsets relative to the marker
const SOF_PRECISION: usize = 4;
const SOF_HEIGHT: usize = 5;
const SOF_WIDTH: usize = 7;
const SOF_COMPONENTS: usize = 9;

/// True for the markers that start a frame header.
pub fn is_sof_marker(marker: u16) -> bool {
    (MARKER_SOF_FIRST..=MARKER_SOF_LAST).contains(&marker)
        && !matches!(marker, MARKER_DHT | MARKER_JPG | MARKER_DAC)
}

/// Describe a frame by its component count.
///
/// # Errors
///
/// Returns [`IoError::UnsupportedVariant`] for component counts other than
/// 1 (grayscale), 3 (RGB) or 4 (CMYK).
pub fn component_layout(bits_per_pixel: u32, components: u8) -> IoResult<String> {
    let kind = match components {
        1 => "grayscale",
        3 => "RGB",
        4 => "CMYK",
        _ => {
            return Err(IoError::UnsupportedVariant(format!(
                "JPEG with {components} components"
            )));
        }
    };
    Ok(format!("{bits_per_pixel}-bit {kind}"))
}

/// Read JPEG header metadata without decoding pixel data
///
/// # Errors
///
/// - [`IoError::Format`] if SOI is missing, a segment length is below 2, or
///   no SOF marker is found
/// - [`IoError::TruncatedData`] if a segment length field, a segment's
///   declared extent or the SOF fields run past the end of `data`
pub fn read_header_jpeg(data: &[u8]) -> IoResult<ImageHeader> {
    let r = ByteReader::new(data);
    if r.u16_be_at(0).ok() != Some(MARKER_SOI) {
        return Err(IoError::format(0, "invalid JPEG SOI marker"));
    }

    let mut offset = 2;
    while offset + 1 < r.len() {
        let marker = r.u16_be_at(offset)?;
        if is_sof_marker(marker) {
            return read_sof(&r, offset);
        }
        let segment_len = r.u16_be_at(offset + 2)? as usize;
        // The length field counts itself
        if segment_len < 2 {
            return Err(IoError::format(
                offset + 2,
                format!("invalid length {segment_len} for marker {marker:04X}"),
            ));
        }
        let payload = offset + 4;
        if offset + 2 + segment_len > r.len() {
            return Err(IoError::TruncatedData {
                offset: payload,
                needed: segment_len - 2,
                available: r.len().saturating_sub(payload),
            });
        }
        log::trace!("jpeg: skipping marker {marker:04X} at {offset}, {segment_len} bytes");
        offset += 2 + segment_len;
    }

    Err(IoError::format(offset, "no SOF marker found"))
}

fn read_sof(r: &ByteReader<'_>, offset: usize) -> IoResult<ImageHeader> {
    let precision = r.u8_at(offset + SOF_PRECISION)?;
    let height = r.u16_be_at(offset + SOF_HEIGHT)?;
    let width = r.u16_be_at(offset + SOF_WIDTH)?;
    let components = r.u8_at(offset + SOF_COMPONENTS)?;

    let bits_per_pixel = precision as u32 * components as u32;
    let depth_description = component_layout(bits_per_pixel, components).unwrap_or_else(|e| {
        log::debug!("jpeg: {e}, reporting generic depth");
        format!("JPEG ({bits_per_pixel} bits, {components} components)")
    });

    log::debug!("jpeg: SOF at {offset}, {width}x{height} ({depth_description})");

    Ok(ImageHeader {
        width: width as u32,
        height: height as u32,
        depth_description,
        bits_per_pixel: Some(bits_per_pixel),
        format: ImageFormat::Jpeg,
    })
}

#[cfg(feature = "jpeg")]
pub use self::codec::read_jpeg;

#[cfg(feature = "jpeg")]
mod codec {
    use crate::{IoError, IoResult};
    use graybit_core::PixelBuffer;
    use jpeg_decoder::{Decoder, PixelFormat};

    /// Decode JPEG pixel data to RGBA8.
    ///
    /// Grayscale (8 and 16 bit), RGB and CMYK frames are supported; CMYK is
    /// converted without color management.
    pub fn read_jpeg(data: &[u8]) -> IoResult<PixelBuffer> {
        let mut decoder = Decoder::new(data);
        let pixels = decoder
            .decode()
            .map_err(|e| IoError::Codec(format!("JPEG decode error: {}", e)))?;
        let info = decoder
            .info()
            .ok_or_else(|| IoError::Codec("JPEG info unavailable after decode".to_string()))?;

        let width = info.width as u32;
        let height = info.height as u32;
        let samples = match info.pixel_format {
            PixelFormat::L8 => 1,
            PixelFormat::L16 => 2,
            PixelFormat::RGB24 => 3,
            PixelFormat::CMYK32 => 4,
        };

        let mut pix = PixelBuffer::new(width, height)?;
        let needed = pix.data().len() / 4 * samples;
        if pixels.len() < needed {
            return Err(IoError::Codec(format!(
                "JPEG decoder returned {} bytes, expected {}",
                pixels.len(),
                needed
            )));
        }

        for (dst, src) in pix
            .data_mut()
            .chunks_exact_mut(4)
            .zip(pixels.chunks_exact(samples))
        {
            let rgba = match info.pixel_format {
                // Big-endian 16-bit samples, keep the high byte
                PixelFormat::L8 | PixelFormat::L16 => [src[0], src[0], src[0], 255],
                PixelFormat::RGB24 => [src[0], src[1], src[2], 255],
                PixelFormat::CMYK32 => {
                    let k = 255 - src[3] as u32;
                    let channel = |c: u8| ((255 - c as u32) * k / 255) as u8;
                    [channel(src[0]), channel(src[1]), channel(src[2]), 255]
                }
            };
            dst.copy_from_slice(&rgba);
        }

        Ok(pix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sof(marker: u16, precision: u8, height: u16, width: u16, components: u8) -> Vec<u8> {
        let mut data = marker.to_be_bytes().to_vec();
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

    #[test]
    fn test_is_sof_marker() {
        for m in [0xFFC0, 0xFFC1, 0xFFC2, 0xFFC3, 0xFFC5, 0xFFCB, 0xFFCD, 0xFFCF] {
            assert!(is_sof_marker(m), "{m:04X}");
        }
        for m in [0xFFC4, 0xFFC8, 0xFFCC, 0xFFDB, 0xFFE0, 0xFFD8, 0xFFBF] {
            assert!(!is_sof_marker(m), "{m:04X}");
        }
    }

    #[test]
    fn test_header_skips_dht() {
        let mut data = vec![0xFF, 0xD8];
        // DHT with a 5-byte segment (length field included)
        data.extend_from_slice(&[0xFF, 0xC4, 0x00, 0x05, 0x00, 0x00, 0x00]);
        data.extend_from_slice(&sof(0xFFC0, 8, 100, 200, 3));
        let header = read_header_jpeg(&data).unwrap();
        assert_eq!(header.width, 200);
        assert_eq!(header.height, 100);
        assert_eq!(header.bits_per_pixel, Some(24));
        assert_eq!(header.depth_description, "24-bit RGB");
        assert_eq!(header.format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_header_progressive_grayscale() {
        let mut data = vec![0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x04, 0x4A, 0x46];
        data.extend_from_slice(&sof(0xFFC2, 12, 5, 7, 1));
        let header = read_header_jpeg(&data).unwrap();
        assert_eq!((header.width, header.height), (7, 5));
        assert_eq!(header.depth_description, "12-bit grayscale");
    }

    #[test]
    fn test_header_cmyk_and_unusual_components() {
        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&sof(0xFFC0, 8, 1, 1, 4));
        assert_eq!(
            read_header_jpeg(&data).unwrap().depth_description,
            "32-bit CMYK"
        );

        let mut data = vec![0xFF, 0xD8];
        data.extend_from_slice(&sof(0xFFC0, 8, 1, 1, 2));
        let header = read_header_jpeg(&data).unwrap();
        assert_eq!(header.bits_per_pixel, Some(16));
        assert_eq!(header.depth_description, "JPEG (16 bits, 2 components)");
    }

    #[test]
    fn test_header_bad_soi() {
        assert!(matches!(
            read_header_jpeg(&[0xFF, 0xD9, 0xFF, 0xC0]),
            Err(IoError::Format { offset: 0, .. })
        ));
        assert!(matches!(
            read_header_jpeg(&[0xFF]),
            Err(IoError::Format { .. })
        ));
    }

    #[test]
    fn test_header_no_sof() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x02, 0xFF, 0xD9, 0x00, 0x02];
        match read_header_jpeg(&data) {
            Err(IoError::Format { message, .. }) => {
                assert_eq!(message, "no SOF marker found");
            }
            other => panic!("expected Format, got {other:?}"),
        }
    }

    #[test]
    fn test_header_truncated_segment_length() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00];
        assert!(matches!(
            read_header_jpeg(&data),
            Err(IoError::TruncatedData { offset: 4, .. })
        ));
    }

    #[test]
    fn test_header_segment_runs_past_end() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0xFF, 0xFF, 0x00];
        assert!(matches!(
            read_header_jpeg(&data),
            Err(IoError::TruncatedData {
                offset: 6,
                needed: 0xFFFD,
                available: 1
            })
        ));
    }

    #[test]
    fn test_header_segment_length_below_two() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x00, 0xFF, 0xC0, 0x00, 0x00];
        assert!(matches!(
            read_header_jpeg(&data),
            Err(IoError::Format { offset: 4, .. })
        ));
    }

    #[test]
    fn test_header_truncated_sof() {
        let data = [0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x10];
        assert!(matches!(
            read_header_jpeg(&data),
            Err(IoError::TruncatedData { .. })
        ));
    }
}
