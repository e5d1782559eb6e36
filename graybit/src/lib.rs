//! graybit - Image decoding and resampling engine for a raster viewer
//!
//! # Overview
//!
//! - GrayBit-7 (`.gb7`) files decoded byte-exactly to RGBA
//! - PNG and JPEG container headers inspected for geometry and color depth
//! - Nearest-neighbor and bilinear resampling, fit-to-viewport scaling and
//!   resize-request resolution
//!
//! # Example
//!
//! ```
//! use graybit::io::read_gb7;
//! use graybit::transform::{ScaleMethod, resample};
//!
//! // 2x1 image, 7-bit gray 0 and 127, no mask
//! let data = [0x47, 0x42, 0x37, 0x1D, 0x01, 0x00, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x00, 0x7F];
//! let image = read_gb7(&data).unwrap();
//! assert_eq!(image.buffer.get_rgba(1, 0), Some([255, 255, 255, 255]));
//!
//! let wide = resample(&image.buffer, 4, 2, ScaleMethod::NearestNeighbor).unwrap();
//! assert_eq!(wide.dimensions(), (4, 2));
//! ```

// Re-export core types (used by every other crate)
pub use graybit_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use graybit_io as io;
pub use graybit_transform as transform;
