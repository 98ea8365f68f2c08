//! Error types for imlab-color

use imlab_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during thresholding and quantization
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] imlab_core::Error),

    /// Scalar parameter outside its documented domain
    #[error("parameter out of range: {0}")]
    OutOfRange(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl ColorError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ColorError::Core(e) => e.kind(),
            ColorError::OutOfRange(_) => ErrorKind::Range,
            ColorError::InvalidParameters(_) => ErrorKind::Invalid,
        }
    }
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
