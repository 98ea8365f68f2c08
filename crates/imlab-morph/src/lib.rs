//! imlab-morph - Binary morphology for 8-bit masks
//!
//! This crate provides:
//!
//! - Structuring elements (SEL) in rectangle, cross and ellipse shapes
//! - Binary morphology: erosion, dilation, opening, closing
//! - Morphological skeletonization
//!
//! Masks may use either the 0/1 or the 0/255 domain; every operation
//! answers in the domain it was given.

pub mod binary;
mod error;
pub mod sel;
pub mod thin;

pub use error::{MorphError, MorphResult};
pub use sel::{MIN_SEL_SIZE, Sel, SelShape};

pub use binary::{MorphOptions, close, dilate, erode, open, validate_binary};
pub use thin::skeletonize;
