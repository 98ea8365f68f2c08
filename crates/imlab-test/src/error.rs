//! Harness errors

use thiserror::Error;

/// Failure to produce or read a regression artifact
#[derive(Debug, Error)]
pub enum TestError {
    /// An image could not be encoded to the output directory
    #[error("cannot write '{path}'")]
    ImageWrite {
        path: String,
        #[source]
        source: imlab_io::IoError,
    },

    /// Filesystem failure while handling output or golden files
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Harness result alias
pub type TestResult<T> = Result<T, TestError>;
