//! Store errors.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the session store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to read store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize store: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Store {path} is locked by another process")]
    Locked { path: PathBuf },

    #[error("Chat not found: {id}")]
    NotFound { id: String },
}
