use std::io;

use thiserror::Error;
use tokio::task::JoinError;

use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Import error: could not read [{path}]: {source}")]
    Io {
        path: String,
        source: io::Error
    },
    #[error("Import error: CSV reader task failed: {0}")]
    Reader(#[from] JoinError),
    #[error("Import error: {0}")]
    Store(#[from] StoreError)
}
