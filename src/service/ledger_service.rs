use std::sync::Arc;

use chrono::Utc;
use tokio::io::AsyncRead;
use tracing::{debug, error, warn};

use crate::export::to_csv_bytes;
use crate::filter::{FilterSpec, Predicate};
use crate::models::{Caller, NewTransaction, Transaction, TransactionPatch};
use crate::receipts::{ReceiptLocation, ReceiptVault};
use crate::service::LedgerError;
use crate::stats::{AggregatedStats, Aggregator};
use crate::storage::LedgerStore;
use crate::types::{Timestamp, TransactionId};

/// Ledger operations on behalf of an explicit caller.
///
/// The service is stateless between calls: every listing and every statistic is a fresh read
/// against the store, and every ownership decision is made on the record as just read.
pub struct LedgerService<S: LedgerStore> {
    store: Arc<S>,
    aggregator: Aggregator<S>,
    vault: ReceiptVault
}

impl<S: LedgerStore> LedgerService<S> {
    pub fn new(store: Arc<S>, vault: ReceiptVault) -> Self {
        Self {
            aggregator: Aggregator::new(store.clone()),
            store,
            vault
        }
    }

    /// Records a new transaction owned by the caller. A missing date defaults to now.
    pub fn create_transaction(&self, caller: &Caller, record: NewTransaction) -> Result<Transaction, LedgerError> {
        record.validate()?;

        let transaction = self.store.insert(caller.user_id, record, now())?;
        debug!("Transaction [{}] created for user [{}]", transaction.id, caller.user_id);

        Ok(transaction)
    }

    pub fn get_transaction(&self, caller: &Caller, transaction_id: TransactionId) -> Result<Transaction, LedgerError> {
        self.load_accessible(caller, transaction_id)
    }

    /// Lists the caller's own transactions. Any owner in `filter` is replaced by the caller.
    pub fn list_own_transactions(&self, caller: &Caller, filter: &FilterSpec) -> Result<Vec<Transaction>, LedgerError> {
        let filter = filter.clone().with_owner(caller.user_id);

        self.scan(&filter)
    }

    /// Applies a partial update. Only the owner may edit, administrators included.
    pub fn update_transaction(&self, caller: &Caller, transaction_id: TransactionId, patch: &TransactionPatch) -> Result<Transaction, LedgerError> {
        patch.validate()?;

        let existing = self.load(transaction_id)?;

        if !caller.owns(existing.owner_id) {
            warn!("User [{}] attempted to edit transaction [{transaction_id}] owned by [{}]", caller.user_id, existing.owner_id);
            return Err(LedgerError::forbidden(caller, transaction_id))
        }

        //NOTE: The store re-checks ownership atomically, zero rows here means the record changed hands or vanished since the read
        let updated = self.store.update_owned(transaction_id, caller.user_id, patch, now())?
            .ok_or_else(|| LedgerError::not_found(transaction_id))?;

        debug!("Transaction [{transaction_id}] updated by user [{}]", caller.user_id);

        Ok(updated)
    }

    pub fn delete_transaction(&self, caller: &Caller, transaction_id: TransactionId) -> Result<(), LedgerError> {
        self.load_accessible(caller, transaction_id)?;

        if !self.store.delete(transaction_id)? {
            return Err(LedgerError::not_found(transaction_id))
        }

        debug!("Transaction [{transaction_id}] deleted by user [{}]", caller.user_id);

        Ok(())
    }

    /// Stores a receipt file and records its location on the transaction. Owner only.
    ///
    /// If the location cannot be recorded the file just written is removed again and the
    /// recording failure is returned.
    pub async fn attach_receipt<R>(&self, caller: &Caller, transaction_id: TransactionId, file_name: &str, source: R) -> Result<Transaction, LedgerError>
    where
        R: AsyncRead + Unpin,
    {
        let existing = self.load(transaction_id)?;

        if !caller.owns(existing.owner_id) {
            warn!("User [{}] attempted to attach a receipt to transaction [{transaction_id}] owned by [{}]", caller.user_id, existing.owner_id);
            return Err(LedgerError::forbidden(caller, transaction_id))
        }

        let stored = self.vault.store(transaction_id, file_name, source).await?;

        match self.store.set_receipt(transaction_id, &stored.reference, now()) {
            Ok(Some(updated)) => {
                debug!("Receipt [{}] attached to transaction [{transaction_id}]", stored.reference);
                Ok(updated)
            }
            Ok(None) => {
                self.vault.remove(&stored).await;
                Err(LedgerError::not_found(transaction_id))
            }
            Err(store_error) => {
                error!("Recording receipt for transaction [{transaction_id}] failed: {store_error}");
                self.vault.remove(&stored).await;
                Err(store_error.into())
            }
        }
    }

    pub fn receipt_location(&self, caller: &Caller, transaction_id: TransactionId) -> Result<ReceiptLocation, LedgerError> {
        let transaction = self.load_accessible(caller, transaction_id)?;

        transaction.receipt_path.as_deref()
            .and_then(ReceiptVault::locate)
            .ok_or(LedgerError::ReceiptMissing { transaction_id })
    }

    pub fn admin_list_transactions(&self, caller: &Caller, filter: &FilterSpec) -> Result<Vec<Transaction>, LedgerError> {
        require_admin(caller)?;

        self.scan(filter)
    }

    pub fn admin_statistics(&self, caller: &Caller, filter: &FilterSpec) -> Result<AggregatedStats, LedgerError> {
        require_admin(caller)?;

        Ok(self.aggregator.aggregate(filter)?)
    }

    /// Exports exactly the listing [`LedgerService::admin_list_transactions`] returns, as CSV.
    pub fn admin_export_csv(&self, caller: &Caller, filter: &FilterSpec) -> Result<Vec<u8>, LedgerError> {
        let transactions = self.admin_list_transactions(caller, filter)?;

        Ok(to_csv_bytes(&transactions)?)
    }

    fn scan(&self, filter: &FilterSpec) -> Result<Vec<Transaction>, LedgerError> {
        let predicate = Predicate::compile(&filter.normalized());

        Ok(self.store.scan(&predicate)?)
    }

    fn load(&self, transaction_id: TransactionId) -> Result<Transaction, LedgerError> {
        self.store.find(transaction_id)?
            .ok_or_else(|| LedgerError::not_found(transaction_id))
    }

    fn load_accessible(&self, caller: &Caller, transaction_id: TransactionId) -> Result<Transaction, LedgerError> {
        let transaction = self.load(transaction_id)?;

        if !caller.may_access(transaction.owner_id) {
            warn!("User [{}] denied access to transaction [{transaction_id}]", caller.user_id);
            return Err(LedgerError::forbidden(caller, transaction_id))
        }

        Ok(transaction)
    }
}

fn require_admin(caller: &Caller) -> Result<(), LedgerError> {
    if !caller.is_admin() {
        warn!("User [{}] denied an administrator operation", caller.user_id);
        return Err(LedgerError::admin_only(caller))
    }

    Ok(())
}

fn now() -> Timestamp {
    Utc::now().fixed_offset()
}
