use thiserror::Error;

use crate::types::TransactionId;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Ledger store is unavailable: {0}")]
    Unavailable(String),
    #[error("Ledger store already holds transaction [{0}]")]
    DuplicateId(TransactionId)
}
