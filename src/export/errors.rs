use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export error: {0}")]
    Csv(#[from] csv::Error),
    #[error("CSV export error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV export error: header [{0}] does not match the export format")]
    UnexpectedHeader(String)
}
