//! Error types for imlab-region

use imlab_core::ErrorKind;
use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] imlab_core::Error),

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

impl RegionError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegionError::Core(e) => e.kind(),
            RegionError::InvalidParameters(_) => ErrorKind::Invalid,
        }
    }
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
