//! Resize-target resolution
//!
//! Turns a user resize request into concrete target dimensions. Values are
//! given either as percentages of the original size or as pixels. With the
//! aspect lock on, one field drives the other through the original
//! `width / height` ratio.

use crate::{ResampleError, ResampleResult};

/// Unit of the requested width and height
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeUnit {
    /// Percent of the original dimension
    #[default]
    Percent,
    /// Absolute pixels
    Pixels,
}

/// Field that drives the other one when the aspect ratio is locked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeAnchor {
    #[default]
    Width,
    Height,
}

/// A resize request as entered by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeRequest {
    pub unit: ResizeUnit,
    pub width: Option<i64>,
    pub height: Option<i64>,
    pub keep_aspect: bool,
    pub anchor: ResizeAnchor,
}

impl Default for ResizeRequest {
    /// 100% of both sides with the aspect lock on.
    fn default() -> Self {
        Self {
            unit: ResizeUnit::Percent,
            width: Some(100),
            height: Some(100),
            keep_aspect: true,
            anchor: ResizeAnchor::Width,
        }
    }
}

impl ResizeRequest {
    pub fn percent(width: i64, height: i64) -> Self {
        Self {
            unit: ResizeUnit::Percent,
            width: Some(width),
            height: Some(height),
            keep_aspect: false,
            anchor: ResizeAnchor::Width,
        }
    }

    pub fn pixels(width: i64, height: i64) -> Self {
        Self {
            unit: ResizeUnit::Pixels,
            width: Some(width),
            height: Some(height),
            keep_aspect: false,
            anchor: ResizeAnchor::Width,
        }
    }

    /// Lock the aspect ratio, driven by `anchor`.
    pub fn keep_aspect(mut self, anchor: ResizeAnchor) -> Self {
        self.keep_aspect = true;
        self.anchor = anchor;
        self
    }

    /// Resolve the request against an `orig_width x orig_height` image.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::InvalidTarget`] if a required field is
    /// missing or non-positive, if the original has no pixels, or if either
    /// resolved side rounds to zero or overflows.
    pub fn target_size(&self, orig_width: u32, orig_height: u32) -> ResampleResult<(u32, u32)> {
        let invalid = || ResampleError::InvalidTarget {
            width: self.width.unwrap_or(0),
            height: self.height.unwrap_or(0),
        };
        if orig_width == 0 || orig_height == 0 {
            return Err(invalid());
        }

        // Non-positive inputs count as absent
        let width = self.width.filter(|&v| v > 0);
        let height = self.height.filter(|&v| v > 0);
        let to_pixels = |value: i64, orig: u32| -> f64 {
            match self.unit {
                ResizeUnit::Percent => (orig as f64 * value as f64 / 100.0).round(),
                ResizeUnit::Pixels => value as f64,
            }
        };

        let (w, h) = if self.keep_aspect {
            let ratio = orig_width as f64 / orig_height as f64;
            let from_width = |v: i64| {
                let w = to_pixels(v, orig_width);
                (w, (w / ratio).round())
            };
            let from_height = |v: i64| {
                let h = to_pixels(v, orig_height);
                ((h * ratio).round(), h)
            };
            match (self.anchor, width, height) {
                (ResizeAnchor::Width, Some(v), _) => from_width(v),
                (ResizeAnchor::Height, _, Some(v)) => from_height(v),
                (_, Some(v), None) => from_width(v),
                (_, None, Some(v)) => from_height(v),
                _ => return Err(invalid()),
            }
        } else {
            match (width, height) {
                (Some(w), Some(h)) => (to_pixels(w, orig_width), to_pixels(h, orig_height)),
                _ => return Err(invalid()),
            }
        };

        let side = |v: f64| (1.0..=u32::MAX as f64).contains(&v).then_some(v as u32);
        match (side(w), side(h)) {
            (Some(w), Some(h)) => Ok((w, h)),
            _ => Err(invalid()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_identity() {
        assert_eq!(
            ResizeRequest::default().target_size(640, 480).unwrap(),
            (640, 480)
        );
    }

    #[test]
    fn test_percent_free() {
        let req = ResizeRequest::percent(50, 200);
        assert_eq!(req.target_size(101, 30).unwrap(), (51, 60));
    }

    #[test]
    fn test_pixels_free() {
        let req = ResizeRequest::pixels(320, 10);
        assert_eq!(req.target_size(640, 480).unwrap(), (320, 10));
    }

    #[test]
    fn test_aspect_anchored_on_width() {
        let req = ResizeRequest::pixels(320, 999).keep_aspect(ResizeAnchor::Width);
        assert_eq!(req.target_size(640, 480).unwrap(), (320, 240));

        let req = ResizeRequest::percent(50, 10).keep_aspect(ResizeAnchor::Width);
        assert_eq!(req.target_size(640, 480).unwrap(), (320, 240));
    }

    #[test]
    fn test_aspect_anchored_on_height() {
        let req = ResizeRequest::pixels(1, 100).keep_aspect(ResizeAnchor::Height);
        assert_eq!(req.target_size(640, 480).unwrap(), (133, 100));
    }

    #[test]
    fn test_aspect_falls_back_to_other_field() {
        let mut req = ResizeRequest::pixels(0, 240).keep_aspect(ResizeAnchor::Width);
        req.width = None;
        assert_eq!(req.target_size(640, 480).unwrap(), (320, 240));

        let req = ResizeRequest::pixels(320, -5).keep_aspect(ResizeAnchor::Height);
        assert_eq!(req.target_size(640, 480).unwrap(), (320, 240));
    }

    #[test]
    fn test_free_requires_both_fields() {
        let mut req = ResizeRequest::pixels(10, 10);
        req.height = None;
        assert!(matches!(
            req.target_size(640, 480),
            Err(ResampleError::InvalidTarget { .. })
        ));
        assert!(ResizeRequest::pixels(0, 10).target_size(640, 480).is_err());
        assert!(ResizeRequest::pixels(10, -1).target_size(640, 480).is_err());
    }

    #[test]
    fn test_rounds_to_zero_is_invalid() {
        // 1% of 10 px rounds to 0
        assert!(ResizeRequest::percent(1, 100).target_size(10, 10).is_err());
        // Extreme aspect: 1 px wide of a 1000x1 image leaves height 0
        let req = ResizeRequest::pixels(1, 1).keep_aspect(ResizeAnchor::Width);
        assert!(req.target_size(1000, 1).is_err());
    }

    #[test]
    fn test_empty_original() {
        assert_eq!(
            ResizeRequest::pixels(5, 6).target_size(0, 10),
            Err(ResampleError::InvalidTarget {
                width: 5,
                height: 6
            })
        );
    }
}
