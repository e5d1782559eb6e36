//! Image resampling
//!
//! Produces a new RGBA buffer at target dimensions from a source buffer.
//!
//! - Nearest-neighbor: copies the closest source pixel
//! - Bilinear: blends the four surrounding source pixels by fractional
//!   distance, per channel
//!
//! Source coordinates map by `x * src_width / dst_width` (top-left aligned),
//! so a same-size resample reproduces the source exactly with either method.
//! The output is allocated once at its final size and filled row by row.

use crate::{ResampleError, ResampleResult};
use graybit_core::{BYTES_PER_PIXEL, PixelBuffer};
use std::fmt;
use std::str::FromStr;

/// Resampling method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling (fastest, pixelated results)
    NearestNeighbor,
    /// Bilinear interpolation (smooth results)
    #[default]
    Bilinear,
}

impl ScaleMethod {
    /// Name used by the viewer's method selectors.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NearestNeighbor => "nearest-neighbor",
            Self::Bilinear => "bilinear",
        }
    }
}

impl fmt::Display for ScaleMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScaleMethod {
    type Err = ResampleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "nearest-neighbor" => Ok(Self::NearestNeighbor),
            "bilinear" => Ok(Self::Bilinear),
            other => Err(ResampleError::UnknownMethod(other.to_string())),
        }
    }
}

/// Resample `src` to `new_width x new_height`.
///
/// # Errors
///
/// - [`ResampleError::InvalidTarget`] if either target dimension is zero
/// - [`ResampleError::EmptySource`] if `src` has no pixels
pub fn resample(
    src: &PixelBuffer,
    new_width: u32,
    new_height: u32,
    method: ScaleMethod,
) -> ResampleResult<PixelBuffer> {
    match method {
        ScaleMethod::NearestNeighbor => scale_nearest(src, new_width, new_height),
        ScaleMethod::Bilinear => scale_bilinear(src, new_width, new_height),
    }
}

/// Resize for display or user request.
///
/// Same-size requests return a copy of `src` without resampling.
pub fn resize(
    src: &PixelBuffer,
    new_width: u32,
    new_height: u32,
    method: ScaleMethod,
) -> ResampleResult<PixelBuffer> {
    check_target(new_width, new_height)?;
    if src.dimensions() == (new_width, new_height) {
        return Ok(src.clone());
    }
    log::debug!(
        "resize: {}x{} -> {}x{} ({})",
        src.width(),
        src.height(),
        new_width,
        new_height,
        method
    );
    resample(src, new_width, new_height, method)
}

fn check_target(new_width: u32, new_height: u32) -> ResampleResult<()> {
    if new_width == 0 || new_height == 0 {
        return Err(ResampleError::InvalidTarget {
            width: new_width as i64,
            height: new_height as i64,
        });
    }
    Ok(())
}

/// Validate the request and allocate the output buffer.
fn prepare(src: &PixelBuffer, new_width: u32, new_height: u32) -> ResampleResult<PixelBuffer> {
    check_target(new_width, new_height)?;
    if src.is_empty() {
        return Err(ResampleError::EmptySource {
            width: src.width(),
            height: src.height(),
        });
    }
    Ok(PixelBuffer::new(new_width, new_height)?)
}

/// Scale with nearest-neighbor sampling.
///
/// Target pixel `(x, y)` copies source pixel
/// `(floor(x * sw / dw), floor(y * sh / dh))`, clamped to the source.
pub fn scale_nearest(
    src: &PixelBuffer,
    new_width: u32,
    new_height: u32,
) -> ResampleResult<PixelBuffer> {
    let mut dst = prepare(src, new_width, new_height)?;
    let (sw, sh) = src.dimensions();
    let x_ratio = sw as f64 / new_width as f64;
    let y_ratio = sh as f64 / new_height as f64;

    // Column lookup is the same for every row
    let src_cols: Vec<usize> = (0..new_width)
        .map(|x| ((x as f64 * x_ratio).floor() as usize).min(sw as usize - 1) * BYTES_PER_PIXEL)
        .collect();

    let data = src.data();
    let stride = src.stride();
    for (y, dst_row) in dst.rows_mut().enumerate() {
        let sy = ((y as f64 * y_ratio).floor() as usize).min(sh as usize - 1);
        let src_row = &data[sy * stride..(sy + 1) * stride];
        for (dst_px, &sx) in dst_row.chunks_exact_mut(BYTES_PER_PIXEL).zip(&src_cols) {
            dst_px.copy_from_slice(&src_row[sx..sx + BYTES_PER_PIXEL]);
        }
    }

    Ok(dst)
}

/// Linear interpolation between `a` and `b`.
#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Neighbor indices and weight along one axis: `(lo, hi, frac)`.
#[inline]
fn axis_sample(i: u32, ratio: f64, src_len: u32) -> (usize, usize, f64) {
    let s = i as f64 * ratio;
    let last = src_len as usize - 1;
    let lo = (s.floor() as usize).min(last);
    let hi = (lo + 1).min(last);
    (lo, hi, s - lo as f64)
}

/// Scale with bilinear interpolation.
///
/// For target pixel `(x, y)` the continuous source position is
/// `(x * sw / dw, y * sh / dh)`. The four neighbors `(x1, y1)`, `(x2, y1)`,
/// `(x1, y2)`, `(x2, y2)` are blended by the fractional offsets, with
/// `x2`/`y2` clamped to the last column/row. Each channel is rounded to
/// nearest and clamped to `[0, 255]`.
pub fn scale_bilinear(
    src: &PixelBuffer,
    new_width: u32,
    new_height: u32,
) -> ResampleResult<PixelBuffer> {
    let mut dst = prepare(src, new_width, new_height)?;
    let (sw, sh) = src.dimensions();
    let x_ratio = sw as f64 / new_width as f64;
    let y_ratio = sh as f64 / new_height as f64;

    let cols: Vec<(usize, usize, f64)> = (0..new_width)
        .map(|x| axis_sample(x, x_ratio, sw))
        .collect();

    let data = src.data();
    let stride = src.stride();
    for (y, dst_row) in dst.rows_mut().enumerate() {
        let (y1, y2, dy) = axis_sample(y as u32, y_ratio, sh);
        let row1 = &data[y1 * stride..(y1 + 1) * stride];
        let row2 = &data[y2 * stride..(y2 + 1) * stride];

        for (dst_px, &(x1, x2, dx)) in dst_row.chunks_exact_mut(BYTES_PER_PIXEL).zip(&cols) {
            let (i1, i2) = (x1 * BYTES_PER_PIXEL, x2 * BYTES_PER_PIXEL);
            for (c, out) in dst_px.iter_mut().enumerate() {
                let top = lerp(row1[i1 + c] as f64, row1[i2 + c] as f64, dx);
                let bottom = lerp(row2[i1 + c] as f64, row2[i2 + c] as f64, dx);
                *out = lerp(top, bottom, dy).round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(dst)
}
