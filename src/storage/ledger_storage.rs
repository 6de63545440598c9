use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use crate::filter::{listing_order, Predicate};
use crate::models::{NewTransaction, Transaction, TransactionPatch, User};
use crate::storage::{LedgerStore, StoreError};
use crate::types::{OwnerId, Timestamp, TransactionId};

/// A process-local [`LedgerStore`] backed by sharded concurrent maps.
///
/// Per-row atomicity comes from holding the shard lock of a row for the whole of a conditional
/// update.
pub struct InMemoryLedgerStore {
    records: Arc<DashMap<TransactionId, Transaction>>,
    users: Arc<DashMap<OwnerId, User>>,
    sequence: AtomicI64
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            users: Arc::new(DashMap::new()),
            sequence: AtomicI64::new(0)
        }
    }

    pub fn register_user(&self, user: User) {
        self.users.insert(user.id, user);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn insert(&self, owner_id: OwnerId, record: NewTransaction, now: Timestamp) -> Result<Transaction, StoreError> {
        let id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;

        let transaction = Transaction {
            id,
            owner_id,
            amount: record.amount,
            transaction_type: record.transaction_type,
            category: record.category,
            description: record.description,
            transaction_date: record.transaction_date.unwrap_or(now),
            receipt_path: None,
            created_at: now,
            updated_at: now
        };

        self.records.insert(id, transaction.clone());

        Ok(transaction)
    }

    fn restore(&self, transaction: Transaction) -> Result<(), StoreError> {
        match self.records.entry(transaction.id) {
            Entry::Occupied(_) => Err(StoreError::DuplicateId(transaction.id)),
            Entry::Vacant(slot) => {
                self.sequence.fetch_max(transaction.id, Ordering::SeqCst);
                slot.insert(transaction);
                Ok(())
            }
        }
    }

    fn find(&self, transaction_id: TransactionId) -> Result<Option<Transaction>, StoreError> {
        Ok(self.records.get(&transaction_id).map(|entry| entry.value().clone()))
    }

    fn update_owned(&self, transaction_id: TransactionId, owner_id: OwnerId, patch: &TransactionPatch, now: Timestamp) -> Result<Option<Transaction>, StoreError> {
        match self.records.get_mut(&transaction_id) {
            Some(mut entry) if entry.owner_id == owner_id => {
                patch.apply_to(entry.value_mut(), now);
                Ok(Some(entry.value().clone()))
            }
            _ => {
                debug!("Conditional update of transaction [{transaction_id}] for owner [{owner_id}] affected no rows");
                Ok(None)
            }
        }
    }

    fn set_receipt(&self, transaction_id: TransactionId, receipt_path: &str, now: Timestamp) -> Result<Option<Transaction>, StoreError> {
        Ok(self.records.get_mut(&transaction_id).map(|mut entry| {
            let transaction = entry.value_mut();
            transaction.receipt_path = Some(receipt_path.to_string());
            transaction.updated_at = now.max(transaction.created_at);
            transaction.clone()
        }))
    }

    fn delete(&self, transaction_id: TransactionId) -> Result<bool, StoreError> {
        Ok(self.records.remove(&transaction_id).is_some())
    }

    fn scan(&self, predicate: &Predicate) -> Result<Vec<Transaction>, StoreError> {
        let mut matching: Vec<Transaction> = self.records.iter()
            .filter(|entry| predicate.matches(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();

        matching.sort_by(listing_order);

        Ok(matching)
    }

    fn user_phone(&self, owner_id: OwnerId) -> Result<Option<String>, StoreError> {
        Ok(self.users.get(&owner_id).map(|user| user.phone.clone()))
    }
}
