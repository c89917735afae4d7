use std::path::PathBuf;

use rankboard_core::FormatError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("id file is not a JSON array of strings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("id file contains an invalid entry {entry:?}: {source}")]
    InvalidEntry {
        entry: String,
        #[source]
        source: FormatError,
    },

    #[error("could not replace id file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
