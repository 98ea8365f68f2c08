//! imlab-filter - Spatial filtering and histogram enhancement
//!
//! This crate provides:
//!
//! - Named 3x3 kernels (smoothing, Laplacian, Prewitt, Sobel) and
//!   arbitrary user kernels
//! - Border policies: reflect, constant padding, constant result band
//! - Convolution to a floating-point [`Plane`]
//! - Smoothing, Laplacian sharpening, Prewitt / Sobel gradients, Canny
//! - Median filtering
//! - Histogram stretch, equalization and range mapping
//! - Inpainting of masked regions (Telea, Navier-Stokes style)

pub mod border;
pub mod convolve;
pub mod edge;
pub mod enhance;
mod error;
pub mod inpaint;
pub mod kernel;
pub mod rank;

pub use border::BorderPolicy;
pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, LaplacianKernel, PrewittDirection, SmoothingKernel};

// Re-export commonly used functions
pub use convolve::{Plane, convolve, custom_mask, smoothing};
pub use edge::{CannyOptions, canny, prewitt, sharpening, sobel};
pub use enhance::{
    MAX_SATURATION_PERCENT, TrcLut, equalize, equalize_trc, stretch, stretch_bounds,
    stretch_range, stretch_trc,
};
pub use inpaint::{INPAINT_RADIUS, InpaintMethod, inpaint, range_mask};
pub use rank::{MEDIAN_SIZES, median};
