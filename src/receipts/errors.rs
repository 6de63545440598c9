use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("Receipt error: [{0}] is not a supported format, use .jpg, .jpeg, .png or .pdf")]
    UnsupportedFormat(String),
    #[error("Receipt error: [{0}] is not a valid file name")]
    InvalidName(String),
    #[error("Receipt error: file exceeds the [{limit}] byte limit")]
    TooLarge {
        limit: u64
    },
    #[error("Receipt error: {0}")]
    Io(#[from] io::Error)
}

impl ReceiptError {
    /// Whether the failure was caused by the uploaded file rather than by the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ReceiptError::Io(_))
    }
}
