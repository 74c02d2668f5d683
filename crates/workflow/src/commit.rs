//! The commit step: one atomic batched write per session.

use thiserror::Error;

use wardstock_core::PatientId;
use wardstock_inventory::{InventoryItem, UsageHistoryRecord};
use wardstock_store::{
    CommitReceipt, ListAppend, RecordStore, RecordWrite, StoreError, WriteBatch, path,
};

use crate::queue::ScanQueue;

/// Commit failure modes.
///
/// The queue is never consumed on failure; callers edit or retry and commit
/// again.
#[derive(Debug, Error)]
pub enum CommitError {
    /// Another session changed an item between our read and our write.
    #[error("item record changed concurrently: {path}")]
    Conflict { path: String },

    #[error("item record missing: {path}")]
    MissingItem { path: String },

    /// The store no longer has enough stock to cover the queued total.
    #[error("cannot deduct {requested} from '{path}': only {available} available")]
    Overcommit {
        path: String,
        requested: u64,
        available: u64,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Summary of an applied commit. `receipt` is `None` for the empty-queue
/// no-op, which touches the store not at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageCommit {
    pub items_updated: usize,
    pub records_appended: usize,
    pub receipt: Option<CommitReceipt>,
}

impl UsageCommit {
    fn noop() -> Self {
        Self {
            items_updated: 0,
            records_appended: 0,
            receipt: None,
        }
    }
}

/// Applies a session's queue to the record store.
///
/// The store is injected so the commit path runs against
/// [`wardstock_store::InMemoryRecordStore`] (or any other backend) without a
/// live network.
#[derive(Debug)]
pub struct UsageCommitter<S> {
    store: S,
}

impl<S: RecordStore> UsageCommitter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Apply every queued deduction and its history records in one batch.
    ///
    /// Each item is re-read and written conditionally on the version just
    /// read, so an update that lands between scan and commit fails the whole
    /// commit with [`CommitError::Conflict`] instead of overcommitting the
    /// item. Duplicate scans of one item collapse into a single deduction;
    /// every original entry still gets its own history record.
    pub fn commit(
        &self,
        patient_id: &PatientId,
        queue: &ScanQueue,
    ) -> Result<UsageCommit, CommitError> {
        if queue.is_empty() {
            return Ok(UsageCommit::noop());
        }

        let mut batch = WriteBatch::default();

        for deduction in queue.deductions() {
            let item_path = path::item(deduction.kind.as_str(), &deduction.item_id);
            let record = self
                .store
                .get(&item_path)?
                .ok_or_else(|| CommitError::MissingItem {
                    path: item_path.clone(),
                })?;

            let mut item: InventoryItem = serde_json::from_value(record.payload)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;

            if deduction.total_used > item.quantity {
                return Err(CommitError::Overcommit {
                    path: item_path,
                    requested: deduction.total_used,
                    available: item.quantity,
                });
            }

            item.quantity -= deduction.total_used;
            let payload = serde_json::to_value(&item)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;

            batch.writes.push(RecordWrite {
                path: item_path,
                payload,
                expected_version: Some(record.version),
            });
        }

        for entry in queue.entries() {
            let record = UsageHistoryRecord {
                patient_id: patient_id.clone(),
                item_name: entry.item_name.clone(),
                quantity: entry.quantity_used,
                kind: entry.kind,
                recorded_at: entry.scanned_at,
            };
            let payload = serde_json::to_value(&record)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;

            batch.appends.push(ListAppend {
                path: path::USAGE_HISTORY.to_string(),
                payload,
            });
        }

        let items_updated = batch.writes.len();
        let records_appended = batch.appends.len();

        let receipt = match self.store.commit(batch) {
            Ok(receipt) => receipt,
            Err(StoreError::Conflict { path, .. }) => {
                tracing::warn!(%path, "usage commit hit a version conflict; queue left intact");
                return Err(CommitError::Conflict { path });
            }
            Err(err) => return Err(err.into()),
        };

        tracing::info!(
            patient = %patient_id,
            items = items_updated,
            history = records_appended,
            commit_id = %receipt.commit_id,
            "usage commit applied"
        );

        Ok(UsageCommit {
            items_updated,
            records_appended,
            receipt: Some(receipt),
        })
    }
}
