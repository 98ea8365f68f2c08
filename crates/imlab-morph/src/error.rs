//! Error types for imlab-morph

use imlab_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during morphological operations
#[derive(Debug, Error)]
pub enum MorphError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] imlab_core::Error),

    /// Invalid structuring element
    #[error("invalid structuring element: {0}")]
    InvalidSel(String),

    /// Structuring element shape lookup by an unknown name
    #[error("unknown structuring element shape: {0}")]
    UnknownShape(String),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl MorphError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MorphError::Core(e) => e.kind(),
            MorphError::InvalidSel(_) => ErrorKind::Range,
            MorphError::UnknownShape(_) | MorphError::InvalidParameters(_) => ErrorKind::Invalid,
        }
    }
}

/// Result type for morphological operations
pub type MorphResult<T> = Result<T, MorphError>;
