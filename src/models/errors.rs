use crate::types::Amount;
use thiserror::Error;

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ValidationError {
    #[error("Unknown transaction type [{0}], expected income or expense")]
    UnknownTransactionType(String),
    #[error("Amount must be positive, got [{0}]")]
    NonPositiveAmount(Amount),
    #[error("Category is required")]
    EmptyCategory,
    #[error("Category exceeds [{max}] characters")]
    CategoryTooLong {
        max: usize
    }
}
