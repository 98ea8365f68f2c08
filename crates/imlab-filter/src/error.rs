//! Error types for imlab-filter

use imlab_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] imlab_core::Error),

    /// Invalid kernel
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Catalogue lookup by a name that does not exist
    #[error("unknown name: {0}")]
    UnknownName(String),

    /// Scalar parameter outside its documented domain
    #[error("parameter out of range: {0}")]
    OutOfRange(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl FilterError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FilterError::Core(e) => e.kind(),
            FilterError::OutOfRange(_) => ErrorKind::Range,
            FilterError::InvalidKernel(_)
            | FilterError::UnknownName(_)
            | FilterError::InvalidParameters(_) => ErrorKind::Invalid,
        }
    }
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;
