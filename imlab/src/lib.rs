//! imlab - Image transform and binary-object feature engine
//!
//! # Overview
//!
//! imlab works on 8-bit grayscale and 3-channel (B, G, R) images and
//! provides:
//!
//! - Point operations, arithmetic, logical and mask operations
//! - Histogram stretching and equalization
//! - Convolution filters, edge detectors and the median filter
//! - Inpainting of masked regions
//! - Thresholding (binary, double, Otsu, adaptive) and posterization
//! - Binary morphology and skeletonization
//! - Feature vectors of binary objects and per-object reports
//! - PNM, PNG and JPEG I/O and tab-separated feature export
//!
//! # Example
//!
//! ```
//! use imlab::{Channels, Pix};
//!
//! let pix = Pix::new(64, 48, Channels::Gray).unwrap();
//! let negated = pix.negate().unwrap();
//! assert_eq!(negated.get_pixel(0, 0), Some(255));
//! ```

// Re-export core types (primary data structures used everywhere)
pub use imlab_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use imlab_color as color;
pub use imlab_filter as filter;
pub use imlab_io as io;
pub use imlab_morph as morph;
pub use imlab_region as region;
