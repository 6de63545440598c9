use std::fs::File;
use std::io::BufReader;
use std::sync::Arc;

use chrono::Utc;
use csv::{ReaderBuilder, Trim};
use tokio::sync::mpsc;
use tokio::task::{spawn_blocking, JoinHandle};
use tracing::{debug, error, warn};

use crate::engine::ImportError;
use crate::export::ExportRecord;
use crate::models::NewTransaction;
use crate::storage::{LedgerStore, StoreError};

/// Counts of what an import run did with its input rows.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize
}

/// Loads ledger rows from a CSV file in the export format into a store.
///
/// Rows carrying an `ID` and `CreatedAt` are restored verbatim, rows without them are recorded
/// as new transactions. Malformed or invalid rows are logged and skipped.
pub struct ImportEngine<S: LedgerStore> {
    store: Arc<S>,
    backpressure: usize
}

impl<S: LedgerStore> ImportEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            backpressure: 256
        }
    }

    /// Orchestrates the read-validate-store pipeline for one CSV file.
    ///
    /// # Errors
    /// An unreadable input file, a crashed reader task or a store failure aborts the import; rows
    /// stored before the failure remain stored.
    pub async fn run(&self, path: &str) -> Result<ImportSummary, ImportError> {
        let (sender, receiver) = mpsc::channel::<ExportRecord>(self.backpressure);
        let csv_handle = self.spawn_csv_reader(path.to_string(), sender);
        let storing_result = self.store_records(receiver).await;

        let read_skipped = csv_handle.await??;
        let summary = storing_result?;

        Ok(ImportSummary {
            skipped: summary.skipped + read_skipped,
            ..summary
        })
    }

    fn spawn_csv_reader(&self, path: String, sender: mpsc::Sender<ExportRecord>) -> JoinHandle<Result<usize, ImportError>> {
        spawn_blocking(move || -> Result<usize, ImportError> {
            let file = File::open(&path).map_err(|source| {
                error!("Error opening CSV at path: {path} | {source}");
                ImportError::Io { path: path.clone(), source }
            })?;

            //NOTE: Only headers are trimmed, padding inside Category or Description is data
            let mut reader = ReaderBuilder::new()
                .trim(Trim::Headers)
                .from_reader(BufReader::new(file));

            let mut skipped = 0;

            for result in reader.deserialize::<ExportRecord>() {
                match result {
                    Ok(record) => {
                        if sender.blocking_send(record).is_err() {
                            break;
                        }
                    }
                    Err(error) => {
                        error!("CSV deserialization error: {error}");
                        skipped += 1;
                    }
                }
            }

            Ok(skipped)
        })
    }

    /// Restores identified rows as they arrive and records the rest once the input is drained, so
    /// a new row can never take an id that a later row of the same file carries.
    async fn store_records(&self, mut receiver: mpsc::Receiver<ExportRecord>) -> Result<ImportSummary, StoreError> {
        let mut summary = ImportSummary::default();
        let mut pending = Vec::new();

        while let Some(record) = receiver.recv().await {
            let owner_id = record.owner_id;
            let created_at = record.created_at;
            let candidate = NewTransaction {
                amount: record.amount,
                transaction_type: record.transaction_type,
                category: record.category.clone(),
                description: record.description.clone(),
                transaction_date: Some(record.transaction_date)
            };

            if let Err(error) = candidate.validate() {
                warn!("Skipping row for user [{owner_id}]: {error}");
                summary.skipped += 1;
                continue;
            }

            let Some(transaction) = record.into_transaction() else {
                pending.push((owner_id, candidate, created_at));
                continue;
            };

            let transaction_id = transaction.id;

            match self.store.restore(transaction) {
                Ok(()) => debug!("Restored transaction [{transaction_id}] for user [{owner_id}]"),
                Err(StoreError::DuplicateId(_)) => {
                    warn!("Skipping duplicate transaction [{transaction_id}]");
                    summary.skipped += 1;
                    continue;
                }
                Err(error) => return Err(error)
            }

            summary.imported += 1;
        }

        for (owner_id, candidate, created_at) in pending {
            let now = created_at.unwrap_or_else(|| Utc::now().fixed_offset());
            let transaction = self.store.insert(owner_id, candidate, now)?;
            debug!("Recorded transaction [{}] for user [{owner_id}]", transaction.id);

            summary.imported += 1;
        }

        Ok(summary)
    }
}
