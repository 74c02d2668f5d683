//! Scan-to-item lookup.
//!
//! The scanner hands over a decoded payload; by the time it gets here the
//! barcode format is already someone else's concern and the payload is an
//! opaque id within one kind's namespace.

use thiserror::Error;

use wardstock_core::ItemId;
use wardstock_inventory::{ItemKind, RawScannedItem, ScannedItem, validate_scanned_item};
use wardstock_store::{RecordStore, StoreError, path};

/// Why a decoded scan payload could not be turned into an item.
#[derive(Debug, Error)]
pub enum ScanError {
    /// No record at the path the payload resolves to.
    #[error("no item record for scan payload at {path}")]
    UnknownItem { path: String },

    /// The record exists but fails the scanned-item checks.
    #[error("item record at {path} is malformed: {}", .errors.join("; "))]
    Malformed { path: String, errors: Vec<String> },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolve a decoded scan payload to a validated item record.
pub fn lookup_scanned_item<S: RecordStore>(
    store: &S,
    kind: ItemKind,
    payload: &str,
) -> Result<ScannedItem, ScanError> {
    let item_path = path::item(kind.as_str(), &ItemId::new(payload.trim()));

    let record = store
        .get(&item_path)?
        .ok_or_else(|| ScanError::UnknownItem {
            path: item_path.clone(),
        })?;

    let raw: RawScannedItem = serde_json::from_value(record.payload)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;

    validate_scanned_item(&raw)
        .into_result()
        .map_err(|errors| ScanError::Malformed {
            path: item_path,
            errors,
        })
}
