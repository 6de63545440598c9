mod amount;
mod errors;

pub use amount::Amount;
pub use errors::AmountError;

pub type OwnerId = i64;
pub type TransactionId = i64;
pub type Timestamp = chrono::DateTime<chrono::FixedOffset>;
