use serde::{Deserialize, Serialize};

use wardstock_core::ItemId;
use wardstock_inventory::{InventoryItem, ItemKind};
use wardstock_store::{RecordStore, RecordWrite, StoreError, path};

/// An item at or below the low-stock threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LowStockItem {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    pub quantity: u64,
}

/// Aggregate inventory snapshot, stored at `csr/overallInventory`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallInventory {
    pub supplies_items: usize,
    pub medicines_items: usize,
    pub supplies_quantity: u64,
    pub medicines_quantity: u64,
    pub low_stock: Vec<LowStockItem>,
}

impl OverallInventory {
    /// Build the aggregate from every known item.
    ///
    /// Low-stock entries (quantity at or below the threshold) come back sorted
    /// emptiest first, then by name.
    pub fn build(items: &[InventoryItem], low_stock_threshold: u64) -> Self {
        let mut overall = OverallInventory::default();

        for item in items {
            match item.kind {
                ItemKind::Supplies => {
                    overall.supplies_items += 1;
                    overall.supplies_quantity += item.quantity;
                }
                ItemKind::Medicines => {
                    overall.medicines_items += 1;
                    overall.medicines_quantity += item.quantity;
                }
            }

            if item.quantity <= low_stock_threshold {
                overall.low_stock.push(LowStockItem {
                    id: item.id.clone(),
                    kind: item.kind,
                    name: item.name.clone(),
                    quantity: item.quantity,
                });
            }
        }

        overall
            .low_stock
            .sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.name.cmp(&b.name)));
        overall
    }
}

/// Rebuild the aggregate from the store and publish it at its well-known path.
pub fn refresh_overall_inventory<S: RecordStore>(
    store: &S,
    low_stock_threshold: u64,
) -> Result<OverallInventory, StoreError> {
    let mut items = Vec::new();
    for record in store.list_prefix(path::INVENTORY_PREFIX)? {
        let item: InventoryItem = serde_json::from_value(record.payload)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        items.push(item);
    }

    let overall = OverallInventory::build(&items, low_stock_threshold);
    let payload =
        serde_json::to_value(&overall).map_err(|e| StoreError::Serialization(e.to_string()))?;

    // The snapshot is disposable and rebuilt wholesale, so the write is
    // unconditional.
    store.put(RecordWrite {
        path: path::OVERALL_INVENTORY.to_string(),
        payload,
        expected_version: None,
    })?;

    Ok(overall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardstock_store::InMemoryRecordStore;

    fn item(id: &str, kind: ItemKind, quantity: u64) -> InventoryItem {
        InventoryItem::new(ItemId::new(id), kind, format!("Item {id}"), quantity)
    }

    #[test]
    fn build_totals_per_kind_and_flags_low_stock() {
        let items = vec![
            item("a", ItemKind::Supplies, 100),
            item("b", ItemKind::Supplies, 3),
            item("c", ItemKind::Medicines, 0),
            item("d", ItemKind::Medicines, 50),
        ];

        let overall = OverallInventory::build(&items, 5);
        assert_eq!(overall.supplies_items, 2);
        assert_eq!(overall.medicines_items, 2);
        assert_eq!(overall.supplies_quantity, 103);
        assert_eq!(overall.medicines_quantity, 50);

        let flagged: Vec<&str> = overall
            .low_stock
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        // Emptiest first.
        assert_eq!(flagged, ["c", "b"]);
    }

    #[test]
    fn refresh_publishes_the_snapshot() {
        let store = InMemoryRecordStore::new();
        for it in [
            item("a", ItemKind::Supplies, 2),
            item("b", ItemKind::Medicines, 40),
        ] {
            store
                .put(RecordWrite {
                    path: path::item(it.kind.as_str(), &it.id),
                    payload: serde_json::to_value(&it).unwrap(),
                    expected_version: None,
                })
                .unwrap();
        }

        let overall = refresh_overall_inventory(&store, 5).unwrap();
        assert_eq!(overall.low_stock.len(), 1);

        let stored = store.get(path::OVERALL_INVENTORY).unwrap().unwrap();
        let roundtrip: OverallInventory = serde_json::from_value(stored.payload).unwrap();
        assert_eq!(roundtrip, overall);
    }

    #[test]
    fn refresh_of_an_empty_store_publishes_an_empty_snapshot() {
        let store = InMemoryRecordStore::new();
        let overall = refresh_overall_inventory(&store, 5).unwrap();
        assert_eq!(overall, OverallInventory::default());
        assert!(store.get(path::OVERALL_INVENTORY).unwrap().is_some());
    }
}
