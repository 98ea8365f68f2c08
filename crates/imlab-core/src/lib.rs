//! imlab Core - Pixel buffer and pixel algebra
//!
//! This crate provides the data model shared by every imlab crate and
//! the operations that act on whole pixel buffers:
//!
//! - [`Pix`] / [`PixMut`] - 8-bit grayscale or B,G,R image (immutable / mutable)
//! - [`Histogram`] / [`HistogramResult`] - Frequency tables and statistics
//! - Point operations (`negate`)
//! - Arithmetic (`absolute_difference`, `add_images`, scalar ops)
//! - Bitwise logic (`logical_not`, `logical_and`, `logical_or`, `logical_xor`)
//! - Mask relabeling (`to_8bit_mask`, `to_binary_mask`)
//! - Channel conversion (`convert_to_gray`, `convert_to_bgr`)
//!
//! All operations are pure: they validate their inputs, allocate a new
//! output buffer and leave the inputs untouched.

pub mod error;
pub mod pix;

pub use error::{Error, ErrorKind, Result};
pub use pix::arith::{
    FLAT_RESULT_VALUE, MAX_ADD_IMAGES, MIN_ADD_IMAGES, clamp_to_u8, normalize_min_max,
};
pub use pix::mask::MaskDomain;
pub use pix::rop::LogicOp;
pub use pix::{Channels, Histogram, HistogramResult, Pix, PixMut};
