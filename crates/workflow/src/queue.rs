use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use wardstock_core::{DomainError, DomainResult, ItemId};
use wardstock_inventory::{ItemKind, ScannedUsageEntry};

/// Pending deductions for one session, in scan order.
///
/// Duplicate scans of the same item stay as separate entries and are summed at
/// commit time. Nothing is persisted; dropping the queue abandons the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanQueue {
    entries: Vec<ScannedUsageEntry>,
}

/// Total deduction for one item across the whole queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDeduction {
    pub kind: ItemKind,
    pub item_id: ItemId,
    pub total_used: u64,
}

impl ScanQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a confirmed scan.
    ///
    /// Rejects the entry when its quantity exceeds what is still available for
    /// that item this session: the availability read at scan time minus
    /// everything already queued for the same kind and id.
    pub fn enqueue(&mut self, entry: ScannedUsageEntry) -> DomainResult<()> {
        if entry.quantity_used == 0 {
            return Err(DomainError::validation(
                "quantity used must be greater than zero",
            ));
        }

        let queued = self.queued_for(entry.kind, &entry.item_id);
        let remaining = entry.available.saturating_sub(queued);
        if entry.quantity_used > remaining {
            return Err(DomainError::invariant(format!(
                "only {remaining} of '{}' still available this session",
                entry.item_name
            )));
        }

        self.entries.push(entry);
        Ok(())
    }

    /// Drop the entry at `index`, returning it. Out of range returns `None`.
    pub fn remove(&mut self, index: usize) -> Option<ScannedUsageEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[ScannedUsageEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Quantity already queued for one item.
    pub fn queued_for(&self, kind: ItemKind, item_id: &ItemId) -> u64 {
        self.entries
            .iter()
            .filter(|e| e.kind == kind && &e.item_id == item_id)
            .map(|e| e.quantity_used)
            .sum()
    }

    /// Per-item totals in deterministic (kind, id) order.
    pub fn deductions(&self) -> Vec<ItemDeduction> {
        let mut totals: BTreeMap<(ItemKind, ItemId), u64> = BTreeMap::new();
        for entry in &self.entries {
            *totals
                .entry((entry.kind, entry.item_id.clone()))
                .or_default() += entry.quantity_used;
        }

        totals
            .into_iter()
            .map(|((kind, item_id), total_used)| ItemDeduction {
                kind,
                item_id,
                total_used,
            })
            .collect()
    }
}
