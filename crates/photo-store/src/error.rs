//! Store layer errors

use photo_core::DomainError;
use std::path::PathBuf;

/// Error type for store and local storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt storage file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid operation: {0}")]
    InvalidOp(String),
}

/// Result type for store operations
pub type StorageResult<T> = Result<T, StoreError>;

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidOp(msg) => DomainError::MutationRejected(msg),
            other => DomainError::Storage(other.to_string()),
        }
    }
}
