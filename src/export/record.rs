use serde::{Deserialize, Serialize};

use crate::models::{Transaction, TransactionType};
use crate::types::{Amount, OwnerId, Timestamp, TransactionId};

/// One row of the tabular export, in fixed column order.
///
/// `ID` and `CreatedAt` are optional when reading so that hand-written input files can describe
/// records that have not been stored yet. Exported rows always carry both.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    #[serde(rename = "ID")]
    pub id: Option<TransactionId>,
    #[serde(rename = "OwnerID")]
    pub owner_id: OwnerId,
    #[serde(rename = "Amount")]
    pub amount: Amount,
    #[serde(rename = "Type")]
    pub transaction_type: TransactionType,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Description")]
    pub description: Option<String>,
    #[serde(rename = "TransactionDate", with = "rfc3339")]
    pub transaction_date: Timestamp,
    #[serde(rename = "CreatedAt", with = "rfc3339_option")]
    pub created_at: Option<Timestamp>,
    #[serde(rename = "ReceiptPath")]
    pub receipt_path: Option<String>
}

impl ExportRecord {
    /// Rebuilds a stored record when the row carries its identity. Modification time is not
    /// exported, so it is taken to be the creation time.
    pub fn into_transaction(self) -> Option<Transaction> {
        let (Some(id), Some(created_at)) = (self.id, self.created_at) else {
            return None
        };

        Some(Transaction {
            id,
            owner_id: self.owner_id,
            amount: self.amount,
            transaction_type: self.transaction_type,
            category: self.category,
            description: self.description,
            transaction_date: self.transaction_date,
            receipt_path: self.receipt_path,
            created_at,
            updated_at: created_at
        })
    }
}

impl From<&Transaction> for ExportRecord {
    fn from(transaction: &Transaction) -> Self {
        Self {
            id: Some(transaction.id),
            owner_id: transaction.owner_id,
            amount: transaction.amount,
            transaction_type: transaction.transaction_type,
            category: transaction.category.clone(),
            description: transaction.description.clone(),
            transaction_date: transaction.transaction_date,
            created_at: Some(transaction.created_at),
            receipt_path: transaction.receipt_path.clone()
        }
    }
}

pub(crate) fn format_timestamp(value: &Timestamp) -> String {
    value.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)
}

mod rfc3339 {
    use chrono::DateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::types::Timestamp;

    pub fn serialize<S>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(value.trim()).map_err(de::Error::custom)
    }
}

mod rfc3339_option {
    use chrono::DateTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    use crate::types::Timestamp;

    pub fn serialize<S>(value: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serializer.serialize_str(&super::format_timestamp(value)),
            None => serializer.serialize_str("")
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) if !value.trim().is_empty() => {
                DateTime::parse_from_rfc3339(value.trim()).map(Some).map_err(de::Error::custom)
            }
            _ => Ok(None)
        }
    }
}
