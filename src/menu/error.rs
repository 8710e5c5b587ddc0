use std::path::PathBuf;
use thiserror::Error;

/// A specialized `Result` type for menu position persistence.
pub type PositionResult<T> = Result<T, PositionError>;

/// The error type for menu position persistence operations.
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("Failed to read menu positions from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write menu positions to {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Menu position file {path:?} is not valid JSON: {source}")]
    InvalidFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
