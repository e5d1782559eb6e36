//! graybit-transform - Resampling and display scaling for graybit
//!
//! - Resampling to arbitrary target sizes (nearest-neighbor, bilinear)
//! - Fit-to-viewport scale factors and display sizes
//! - Resolution of user resize requests (percent or pixels, optional
//!   aspect-ratio lock)

mod error;
pub mod fit;
pub mod resize;
pub mod scale;

pub use error::{ResampleError, ResampleResult};
pub use fit::{FitOptions, display_size, fit_to_viewport, scale_for_display, scale_to_fit};
pub use resize::{ResizeAnchor, ResizeRequest, ResizeUnit};
pub use scale::{ScaleMethod, resample, resize, scale_bilinear, scale_nearest};
