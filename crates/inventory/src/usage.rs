use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wardstock_core::{DomainError, DomainResult, ItemId, PatientId};

use crate::item::{InventoryItem, ItemKind};
use crate::validate::ScannedItem;

/// A confirmed scan waiting in the current session's queue.
///
/// Lives only in local pending state until commit; dropping the session
/// discards it. Carries the availability read at scan time so the queue can
/// bound what else gets queued for the same item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannedUsageEntry {
    pub item_id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub item_name: String,
    pub quantity_used: u64,
    /// Item availability as read when the scan was confirmed.
    pub available: u64,
    pub scanned_at: DateTime<Utc>,
}

impl ScannedUsageEntry {
    /// Capture a confirmed scan against the item record as just read.
    pub fn new(
        item: &InventoryItem,
        quantity_used: u64,
        scanned_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::build(
            item.id.clone(),
            item.kind,
            item.name.clone(),
            item.quantity,
            quantity_used,
            scanned_at,
        )
    }

    /// Capture a confirmed scan against a sanitized scan result.
    pub fn from_scan(
        item: &ScannedItem,
        quantity_used: u64,
        scanned_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        Self::build(
            item.id.clone(),
            item.kind,
            item.name.clone(),
            item.quantity,
            quantity_used,
            scanned_at,
        )
    }

    fn build(
        item_id: ItemId,
        kind: ItemKind,
        item_name: String,
        available: u64,
        quantity_used: u64,
        scanned_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if quantity_used == 0 {
            return Err(DomainError::validation(
                "quantity used must be greater than zero",
            ));
        }
        if quantity_used > available {
            return Err(DomainError::invariant(format!(
                "quantity used ({quantity_used}) exceeds available stock ({available})"
            )));
        }

        Ok(Self {
            item_id,
            kind,
            item_name,
            quantity_used,
            available,
            scanned_at,
        })
    }
}

/// Append-only usage log entry, one per committed scan.
///
/// Never mutated or deleted after commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageHistoryRecord {
    pub patient_id: PatientId,
    pub item_name: String,
    pub quantity: u64,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub recorded_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauze(quantity: u64) -> InventoryItem {
        InventoryItem::new(ItemId::new("7"), ItemKind::Supplies, "Gauze", quantity)
    }

    #[test]
    fn scan_captures_item_snapshot() {
        let entry = ScannedUsageEntry::new(&gauze(10), 3, Utc::now()).unwrap();
        assert_eq!(entry.item_name, "Gauze");
        assert_eq!(entry.quantity_used, 3);
        assert_eq!(entry.available, 10);
    }

    #[test]
    fn scan_rejects_zero_quantity() {
        assert!(ScannedUsageEntry::new(&gauze(10), 0, Utc::now()).is_err());
    }

    #[test]
    fn scan_rejects_quantity_above_availability() {
        assert!(ScannedUsageEntry::new(&gauze(2), 3, Utc::now()).is_err());
    }

    #[test]
    fn history_record_uses_the_stored_document_shape() {
        let record = UsageHistoryRecord {
            patient_id: PatientId::new("p-1"),
            item_name: "Gauze".to_string(),
            quantity: 2,
            kind: ItemKind::Supplies,
            recorded_at: Utc::now(),
        };

        let doc = serde_json::to_value(&record).unwrap();
        assert_eq!(doc["patientId"], "p-1");
        assert_eq!(doc["type"], "supplies");
        assert_eq!(doc["quantity"], 2);
    }
}
