use serde::{Deserialize, Serialize};

use crate::models::{TransactionType, ValidationError};
use crate::types::{Amount, OwnerId, Timestamp, TransactionId};

pub const MAX_CATEGORY_LENGTH: usize = 100;

/// A single income or expense entry in the ledger.
///
/// `transaction_date` is when the money moved, as reported by the owner. It is independent of
/// `created_at`, which the store stamps when the record is inserted.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Store-assigned identifier.
    pub id: TransactionId,
    /// The user who recorded the entry.
    #[serde(rename = "user_id")]
    pub owner_id: OwnerId,
    /// Whole minor currency units, always positive.
    pub amount: Amount,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub transaction_date: Timestamp,
    /// Location of an attached receipt file, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_path: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp
}

/// The owner-supplied fields of a transaction about to be recorded.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct NewTransaction {
    pub amount: Amount,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to the time of recording when absent.
    #[serde(default)]
    pub transaction_date: Option<Timestamp>
}

impl NewTransaction {
    pub fn new(amount: Amount, transaction_type: TransactionType, category: impl Into<String>) -> Self {
        Self {
            amount,
            transaction_type,
            category: category.into(),
            description: None,
            transaction_date: None
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_date(mut self, transaction_date: Timestamp) -> Self {
        self.transaction_date = Some(transaction_date);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_amount(self.amount)?;
        validate_category(&self.category)
    }
}

/// A partial update. Every `None` leaves the stored field untouched.
///
/// `description` is doubly optional: `Some(None)` clears it, `None` keeps it.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct TransactionPatch {
    pub amount: Option<Amount>,
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
    pub description: Option<Option<String>>,
    pub transaction_date: Option<Timestamp>
}

impl TransactionPatch {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.transaction_type.is_none()
            && self.category.is_none()
            && self.description.is_none()
            && self.transaction_date.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(amount) = self.amount {
            validate_amount(amount)?;
        }

        if let Some(category) = &self.category {
            validate_category(category)?;
        }

        Ok(())
    }

    /// Writes every set field onto `transaction` and stamps the modification time.
    pub fn apply_to(&self, transaction: &mut Transaction, now: Timestamp) {
        if let Some(amount) = self.amount {
            transaction.amount = amount;
        }
        if let Some(transaction_type) = self.transaction_type {
            transaction.transaction_type = transaction_type;
        }
        if let Some(category) = &self.category {
            transaction.category = category.clone();
        }
        if let Some(description) = &self.description {
            transaction.description = description.clone();
        }
        if let Some(transaction_date) = self.transaction_date {
            transaction.transaction_date = transaction_date;
        }

        transaction.updated_at = now.max(transaction.created_at);
    }
}

fn validate_amount(amount: Amount) -> Result<(), ValidationError> {
    if !amount.is_positive() {
        return Err(ValidationError::NonPositiveAmount(amount))
    }

    Ok(())
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    if category.trim().is_empty() {
        return Err(ValidationError::EmptyCategory)
    }

    if category.chars().count() > MAX_CATEGORY_LENGTH {
        return Err(ValidationError::CategoryTooLong { max: MAX_CATEGORY_LENGTH })
    }

    Ok(())
}
