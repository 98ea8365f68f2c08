//! imlab Color - Thresholding and gray-level quantization
//!
//! This crate turns grayscale images into masks and reduced-level images:
//!
//! - **Thresholding** ([`threshold`]): Fixed, level-preserving and band
//!   thresholds, Otsu's method, adaptive (mean / Gaussian) thresholding
//! - **Quantization** ([`quantize`]): Posterization to N gray levels
//!
//! Every threshold produces a 0/255 mask except
//! [`threshold_with_levels`], which keeps the passing pixel values.

pub mod error;
pub mod quantize;
pub mod threshold;

// Re-export core types
pub use imlab_core;

pub use error::{ColorError, ColorResult};

pub use quantize::posterize;

pub use threshold::{
    // Types
    AdaptiveMethod,
    AdaptiveThresholdOptions,
    // Functions
    adaptive_threshold,
    adaptive_threshold_inverse,
    compute_otsu_threshold,
    threshold_binary,
    threshold_double,
    threshold_otsu,
    threshold_with_levels,
};
