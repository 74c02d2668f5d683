use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use thiserror::Error;
use uuid::Uuid;

/// A record as currently stored: its payload plus concurrency metadata.
///
/// `version` is a monotonically increasing write counter, 1 after the first
/// write. It exists so callers can read a record, derive an update from it,
/// and write back conditionally on the version they read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionedRecord {
    pub path: String,
    pub payload: JsonValue,
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

/// One document write, optionally conditional on the stored version.
///
/// `expected_version: None` writes unconditionally. `Some(v)` is a
/// compare-and-set: the write only applies if the stored version is exactly
/// `v`, with `Some(0)` asserting the record does not exist yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordWrite {
    pub path: String,
    pub payload: JsonValue,
    pub expected_version: Option<u64>,
}

/// One payload appended to an append-only list path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListAppend {
    pub path: String,
    pub payload: JsonValue,
}

/// A batch of document writes and list appends applied atomically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteBatch {
    pub writes: Vec<RecordWrite>,
    pub appends: Vec<ListAppend>,
}

impl WriteBatch {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.appends.is_empty()
    }
}

/// Receipt for a successfully applied batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitReceipt {
    pub commit_id: Uuid,
    pub records_written: usize,
    pub records_appended: usize,
    pub committed_at: DateTime<Utc>,
}

/// Record store operation error.
///
/// These are infrastructure failures (conflicts, availability, encoding), as
/// opposed to domain errors (validation, invariants).
#[derive(Debug, Error)]
pub enum StoreError {
    /// A compare-and-set precondition failed.
    #[error("version conflict at '{path}': expected {expected}, found {actual}")]
    Conflict {
        path: String,
        expected: u64,
        actual: u64,
    },

    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Versioned, path-addressed record store.
///
/// Documents live at `/`-separated paths and carry a write version; list paths
/// are append-only. Implementations must make `commit` atomic: every
/// expected-version precondition in the batch is checked before anything is
/// applied, and on any failure no write or append takes effect. That contract
/// is what lets callers batch a multi-record update plus its history entries
/// into a single all-or-nothing operation.
pub trait RecordStore: Send + Sync {
    /// Read one record, `None` if nothing was ever written at `path`.
    fn get(&self, path: &str) -> Result<Option<VersionedRecord>, StoreError>;

    /// All records whose path starts with `prefix`, in path order.
    fn list_prefix(&self, prefix: &str) -> Result<Vec<VersionedRecord>, StoreError>;

    /// Contents of an append-only list, oldest first. Empty if never appended.
    fn read_list(&self, path: &str) -> Result<Vec<JsonValue>, StoreError>;

    /// Apply a batch atomically.
    fn commit(&self, batch: WriteBatch) -> Result<CommitReceipt, StoreError>;

    /// Write one record.
    fn put(&self, write: RecordWrite) -> Result<CommitReceipt, StoreError> {
        self.commit(WriteBatch {
            writes: vec![write],
            appends: Vec::new(),
        })
    }

    /// Append one payload to an append-only list.
    fn append(&self, path: &str, payload: JsonValue) -> Result<CommitReceipt, StoreError> {
        self.commit(WriteBatch {
            writes: Vec::new(),
            appends: vec![ListAppend {
                path: path.to_string(),
                payload,
            }],
        })
    }
}

impl<S> RecordStore for &S
where
    S: RecordStore + ?Sized,
{
    fn get(&self, path: &str) -> Result<Option<VersionedRecord>, StoreError> {
        (**self).get(path)
    }

    fn list_prefix(&self, prefix: &str) -> Result<Vec<VersionedRecord>, StoreError> {
        (**self).list_prefix(prefix)
    }

    fn read_list(&self, path: &str) -> Result<Vec<JsonValue>, StoreError> {
        (**self).read_list(path)
    }

    fn commit(&self, batch: WriteBatch) -> Result<CommitReceipt, StoreError> {
        (**self).commit(batch)
    }
}

impl<S> RecordStore for Arc<S>
where
    S: RecordStore + ?Sized,
{
    fn get(&self, path: &str) -> Result<Option<VersionedRecord>, StoreError> {
        (**self).get(path)
    }

    fn list_prefix(&self, prefix: &str) -> Result<Vec<VersionedRecord>, StoreError> {
        (**self).list_prefix(prefix)
    }

    fn read_list(&self, path: &str) -> Result<Vec<JsonValue>, StoreError> {
        (**self).read_list(path)
    }

    fn commit(&self, batch: WriteBatch) -> Result<CommitReceipt, StoreError> {
        (**self).commit(batch)
    }
}
