use thiserror::Error;

use crate::export::ExportError;
use crate::filter::FilterError;
use crate::models::{Caller, ValidationError};
use crate::receipts::ReceiptError;
use crate::stats::StatsError;
use crate::storage::StoreError;
use crate::types::{OwnerId, TransactionId};

/// Coarse classification of a [`LedgerError`], for callers mapping failures onto a transport.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Validation,
    Store,
    Internal
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Transaction [{transaction_id}] was not found")]
    NotFound {
        transaction_id: TransactionId
    },
    #[error("User [{user_id}] may not act on transaction [{transaction_id}]")]
    Forbidden {
        user_id: OwnerId,
        transaction_id: TransactionId
    },
    #[error("User [{user_id}] is not an administrator")]
    AdminOnly {
        user_id: OwnerId
    },
    #[error("Transaction [{transaction_id}] has no receipt")]
    ReceiptMissing {
        transaction_id: TransactionId
    },
    #[error("Invalid transaction: {0}")]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    Filter(#[from] FilterError),
    #[error("{0}")]
    Store(#[from] StoreError),
    #[error("{0}")]
    Stats(#[from] StatsError),
    #[error("{0}")]
    Export(#[from] ExportError),
    #[error("{0}")]
    Receipt(#[from] ReceiptError)
}

impl LedgerError {
    pub fn not_found(transaction_id: TransactionId) -> Self {
        Self::NotFound { transaction_id }
    }

    pub fn forbidden(caller: &Caller, transaction_id: TransactionId) -> Self {
        Self::Forbidden { user_id: caller.user_id, transaction_id }
    }

    pub fn admin_only(caller: &Caller) -> Self {
        Self::AdminOnly { user_id: caller.user_id }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::NotFound { .. } | LedgerError::ReceiptMissing { .. } => ErrorKind::NotFound,
            LedgerError::Forbidden { .. } | LedgerError::AdminOnly { .. } => ErrorKind::Forbidden,
            LedgerError::Validation(_) | LedgerError::Filter(_) => ErrorKind::Validation,
            LedgerError::Store(_) | LedgerError::Stats(StatsError::Store(_)) => ErrorKind::Store,
            LedgerError::Receipt(error) if error.is_client_error() => ErrorKind::Validation,
            LedgerError::Stats(_) | LedgerError::Export(_) | LedgerError::Receipt(_) => ErrorKind::Internal
        }
    }

    /// The message safe to show the caller.
    ///
    /// A missing record and someone else's record read the same, so an unprivileged caller cannot
    /// probe which ids exist. [`LedgerError::kind`] still tells them apart.
    pub fn public_message(&self) -> String {
        match self {
            LedgerError::NotFound { .. } | LedgerError::Forbidden { .. } => "transaction not found".to_string(),
            LedgerError::AdminOnly { .. } => "forbidden".to_string(),
            LedgerError::ReceiptMissing { .. } => "receipt not found for this transaction".to_string(),
            LedgerError::Validation(_) | LedgerError::Filter(_) => self.to_string(),
            LedgerError::Receipt(error) if error.is_client_error() => error.to_string(),
            _ => "internal server error".to_string()
        }
    }
}
