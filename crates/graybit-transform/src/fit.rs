//! Fit-to-viewport display scaling
//!
//! Images larger than the viewport (less padding) are shown scaled down to
//! fit; smaller images are shown at their natural size.

use crate::scale::{ScaleMethod, resample};
use crate::{ResampleError, ResampleResult};
use graybit_core::PixelBuffer;

/// Options for [`scale_to_fit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitOptions {
    /// Margin kept free on each side of the viewport, in pixels
    pub padding: u32,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self { padding: 50 }
    }
}

impl FitOptions {
    pub fn with_padding(padding: u32) -> Self {
        Self { padding }
    }

    /// Area left for the image inside a viewport, never below 1x1.
    fn available(&self, viewport_width: u32, viewport_height: u32) -> (u32, u32) {
        let margin = self.padding.saturating_mul(2);
        (
            viewport_width.saturating_sub(margin).max(1),
            viewport_height.saturating_sub(margin).max(1),
        )
    }
}

/// Scale factor that fits an image inside a viewport.
///
/// Returns 1.0 when the image already fits (or has no pixels), otherwise
/// the smaller of the per-axis ratios so the whole image stays visible.
pub fn scale_to_fit(
    image_width: u32,
    image_height: u32,
    viewport_width: u32,
    viewport_height: u32,
    options: &FitOptions,
) -> f64 {
    if image_width == 0 || image_height == 0 {
        return 1.0;
    }
    let (avail_w, avail_h) = options.available(viewport_width, viewport_height);
    if image_width <= avail_w && image_height <= avail_h {
        return 1.0;
    }
    let scale_w = avail_w as f64 / image_width as f64;
    let scale_h = avail_h as f64 / image_height as f64;
    scale_w.min(scale_h)
}

/// Display size of a `width x height` image at `scale`.
///
/// Each axis is rounded to nearest and kept at least 1 pixel.
///
/// # Errors
///
/// Returns [`ResampleError::InvalidScale`] if `scale` is not finite or not
/// positive.
pub fn display_size(width: u32, height: u32, scale: f64) -> ResampleResult<(u32, u32)> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(ResampleError::InvalidScale(scale));
    }
    let axis = |dim: u32| ((dim as f64 * scale).round().min(u32::MAX as f64) as u32).max(1);
    Ok((axis(width), axis(height)))
}

/// Resample `src` to its display size at `scale`.
///
/// A scale that leaves the size unchanged returns a copy of `src`.
pub fn scale_for_display(
    src: &PixelBuffer,
    scale: f64,
    method: ScaleMethod,
) -> ResampleResult<PixelBuffer> {
    let (width, height) = display_size(src.width(), src.height(), scale)?;
    crate::scale::resize(src, width, height, method)
}

/// Fit `src` into a viewport and resample it for display.
pub fn fit_to_viewport(
    src: &PixelBuffer,
    viewport_width: u32,
    viewport_height: u32,
    options: &FitOptions,
    method: ScaleMethod,
) -> ResampleResult<PixelBuffer> {
    let scale = scale_to_fit(
        src.width(),
        src.height(),
        viewport_width,
        viewport_height,
        options,
    );
    if scale == 1.0 {
        return Ok(src.clone());
    }
    log::debug!("fit: scale {scale:.4} for viewport {viewport_width}x{viewport_height}");
    let (width, height) = display_size(src.width(), src.height(), scale)?;
    resample(src, width, height, method)
}
