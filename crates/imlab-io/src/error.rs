//! Error type shared by the codecs and the table writers

use imlab_core::ErrorKind;
use thiserror::Error;

/// Failure while reading or writing images and feature tables
#[derive(Error, Debug)]
pub enum IoError {
    /// Filesystem or stream failure
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Unknown signature, or a codec disabled at build time
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Header or sample data that does not describe an image
    #[error("malformed image: {0}")]
    InvalidData(String),

    /// Failure reported by the underlying decoder
    #[error("cannot decode: {0}")]
    DecodeError(String),

    /// Failure reported by the underlying encoder
    #[error("cannot encode: {0}")]
    EncodeError(String),

    /// Invalid image geometry or layout
    #[error(transparent)]
    Core(#[from] imlab_core::Error),
}

impl IoError {
    /// Classify this error; only wrapped core errors carry a specific kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            IoError::Core(e) => e.kind(),
            _ => ErrorKind::Invalid,
        }
    }
}

/// Result alias for I/O operations
pub type IoResult<T> = Result<T, IoError>;
