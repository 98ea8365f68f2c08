//! Error types for imlab-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Every failure is local and recoverable: validation runs before any
//! output pixel is produced, so inputs are never left half-processed.
//!
//! The [`ErrorKind`] classification groups the variants into the small
//! set of categories a user interface reports (wrong channel count,
//! size mismatch, parameter range, image count, mask domain, division
//! by zero).

use thiserror::Error;

/// Imlab error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Sample buffer length does not match the image geometry
    #[error("buffer size mismatch: expected {expected} samples, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Wrong number of channels (e.g. color passed where grayscale is required)
    #[error("unsupported channel count: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: u32, actual: u32 },

    /// Incompatible image sizes
    #[error("incompatible image sizes: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),

    /// Scalar parameter outside its documented domain
    #[error("parameter out of range: {0}")]
    OutOfRange(String),

    /// Wrong number of images supplied to an n-ary operation
    #[error("invalid image count: expected {min}..={max}, got {actual}")]
    InvalidImageCount {
        min: usize,
        max: usize,
        actual: usize,
    },

    /// Mask contains values outside the expected binary domain
    #[error("invalid mask domain: {0}")]
    InvalidMaskDomain(String),

    /// Scalar division by zero
    #[error("division by zero")]
    DivideByZero,

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Category of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong channel count
    Shape,
    /// Images do not share height and width
    SizeMismatch,
    /// Scalar parameter outside its domain
    Range,
    /// Wrong number of input images
    Count,
    /// Mask sample domain violated
    Domain,
    /// Scalar division by zero
    DivideByZero,
    /// Malformed construction arguments
    Invalid,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedChannels { .. } => ErrorKind::Shape,
            Error::IncompatibleSizes(..) => ErrorKind::SizeMismatch,
            Error::OutOfRange(_) => ErrorKind::Range,
            Error::InvalidImageCount { .. } => ErrorKind::Count,
            Error::InvalidMaskDomain(_) => ErrorKind::Domain,
            Error::DivideByZero => ErrorKind::DivideByZero,
            Error::InvalidDimension { .. }
            | Error::BufferSize { .. }
            | Error::IndexOutOfBounds { .. }
            | Error::InvalidParameter(_) => ErrorKind::Invalid,
        }
    }
}

/// Result type alias for imlab operations
pub type Result<T> = std::result::Result<T, Error>;
