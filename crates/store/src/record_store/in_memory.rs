use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use uuid::Uuid;

use super::r#trait::{
    CommitReceipt, RecordStore, RecordWrite, StoreError, VersionedRecord, WriteBatch,
};

#[derive(Debug, Clone)]
struct StoredDoc {
    payload: JsonValue,
    version: u64,
    updated_at: DateTime<Utc>,
}

/// In-memory record store.
///
/// Intended for tests/dev. It implements the same compare-and-set and
/// all-or-nothing batch semantics a remote backend must provide, so code
/// exercised against it carries over unchanged.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    docs: RwLock<HashMap<String, StoredDoc>>,
    lists: RwLock<HashMap<String, Vec<JsonValue>>>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get(&self, path: &str) -> Result<Option<VersionedRecord>, StoreError> {
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(docs.get(path).map(|doc| VersionedRecord {
            path: path.to_string(),
            payload: doc.payload.clone(),
            version: doc.version,
            updated_at: doc.updated_at,
        }))
    }

    fn list_prefix(&self, prefix: &str) -> Result<Vec<VersionedRecord>, StoreError> {
        let docs = self
            .docs
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let mut records: Vec<VersionedRecord> = docs
            .iter()
            .filter(|(path, _)| path.starts_with(prefix))
            .map(|(path, doc)| VersionedRecord {
                path: path.clone(),
                payload: doc.payload.clone(),
                version: doc.version,
                updated_at: doc.updated_at,
            })
            .collect();

        records.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(records)
    }

    fn read_list(&self, path: &str) -> Result<Vec<JsonValue>, StoreError> {
        let lists = self
            .lists
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(lists.get(path).cloned().unwrap_or_default())
    }

    fn commit(&self, batch: WriteBatch) -> Result<CommitReceipt, StoreError> {
        let mut docs = self
            .docs
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        let mut lists = self
            .lists
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        // Precondition pass: nothing is applied unless every write passes.
        for write in &batch.writes {
            if let Some(expected) = write.expected_version {
                let actual = docs.get(&write.path).map(|d| d.version).unwrap_or(0);
                if actual != expected {
                    return Err(StoreError::Conflict {
                        path: write.path.clone(),
                        expected,
                        actual,
                    });
                }
            }
        }

        let now = Utc::now();
        let records_written = batch.writes.len();
        let records_appended = batch.appends.len();

        for RecordWrite { path, payload, .. } in batch.writes {
            let version = docs.get(&path).map(|d| d.version).unwrap_or(0) + 1;
            docs.insert(
                path,
                StoredDoc {
                    payload,
                    version,
                    updated_at: now,
                },
            );
        }

        for append in batch.appends {
            lists.entry(append.path).or_default().push(append.payload);
        }

        Ok(CommitReceipt {
            commit_id: Uuid::now_v7(),
            records_written,
            records_appended,
            committed_at: now,
        })
    }
}
