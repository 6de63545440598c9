mod errors;
mod ledger_storage;

use crate::filter::Predicate;
use crate::models::{NewTransaction, Transaction, TransactionPatch};
use crate::types::{OwnerId, Timestamp, TransactionId};

pub use errors::StoreError;
pub use ledger_storage::InMemoryLedgerStore;

/// Durable keyed storage for ledger records.
///
/// Implementations must make `update_owned`, `set_receipt` and `delete` atomic per row: the
/// ownership check and the write happen as one step, never as a read followed by a write.
/// `Ok(None)` and `Ok(false)` mean "zero rows affected", they are not failures.
pub trait LedgerStore: Send + Sync + 'static {
    /// Inserts a new record for `owner_id` and returns it with its assigned id and timestamps.
    fn insert(&self, owner_id: OwnerId, record: NewTransaction, now: Timestamp) -> Result<Transaction, StoreError>;

    /// Stores a previously exported record verbatim, keeping its id and timestamps.
    fn restore(&self, transaction: Transaction) -> Result<(), StoreError>;

    fn find(&self, transaction_id: TransactionId) -> Result<Option<Transaction>, StoreError>;

    /// Applies `patch` only if the row exists and belongs to `owner_id`.
    fn update_owned(&self, transaction_id: TransactionId, owner_id: OwnerId, patch: &TransactionPatch, now: Timestamp) -> Result<Option<Transaction>, StoreError>;

    fn set_receipt(&self, transaction_id: TransactionId, receipt_path: &str, now: Timestamp) -> Result<Option<Transaction>, StoreError>;

    fn delete(&self, transaction_id: TransactionId) -> Result<bool, StoreError>;

    /// Returns every matching record in listing order (see [`crate::filter::listing_order`]).
    fn scan(&self, predicate: &Predicate) -> Result<Vec<Transaction>, StoreError>;

    /// Looks up the display phone of a user from the store's user directory.
    fn user_phone(&self, owner_id: OwnerId) -> Result<Option<String>, StoreError>;
}
