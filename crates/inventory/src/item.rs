use core::str::FromStr;

use serde::{Deserialize, Serialize};

use wardstock_core::{DomainError, ItemId};

/// Item type, partitioning the inventory namespace.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Supplies,
    Medicines,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemKind::Supplies => "supplies",
            ItemKind::Medicines => "medicines",
        }
    }
}

impl core::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "supplies" => Ok(ItemKind::Supplies),
            "medicines" => Ok(ItemKind::Medicines),
            other => Err(DomainError::validation(format!("unknown item type '{other}'"))),
        }
    }
}

/// An inventory item record as stored under `inventory/{type}/{id}`.
///
/// Owned by the record store; `quantity` is mutated only through the usage
/// commit step. Field names follow the stored camelCase document shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub name: String,
    pub quantity: u64,
    /// Price in smallest currency unit (e.g., cents).
    #[serde(default)]
    pub retail_price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl InventoryItem {
    pub fn new(id: ItemId, kind: ItemKind, name: impl Into<String>, quantity: u64) -> Self {
        Self {
            id,
            kind,
            name: name.into(),
            quantity,
            retail_price: 0,
            dosage: None,
            instructions: None,
            brand: None,
            description: None,
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.quantity > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_round_trips_through_text() {
        assert_eq!("supplies".parse::<ItemKind>().unwrap(), ItemKind::Supplies);
        assert_eq!("medicines".parse::<ItemKind>().unwrap(), ItemKind::Medicines);
        assert!("equipment".parse::<ItemKind>().is_err());
    }

    #[test]
    fn item_deserializes_from_the_stored_document_shape() {
        let doc = json!({
            "id": "8901030865278",
            "type": "medicines",
            "name": "Paracetamol 500mg",
            "quantity": 40,
            "retailPrice": 250,
            "dosage": "500mg",
            "instructions": "After meals"
        });

        let item: InventoryItem = serde_json::from_value(doc).unwrap();
        assert_eq!(item.kind, ItemKind::Medicines);
        assert_eq!(item.quantity, 40);
        assert_eq!(item.retail_price, 250);
        assert_eq!(item.dosage.as_deref(), Some("500mg"));
        assert!(item.brand.is_none());
    }

    #[test]
    fn optional_fields_are_omitted_when_absent() {
        let item = InventoryItem::new(ItemId::new("7"), ItemKind::Supplies, "Gauze", 10);
        let doc = serde_json::to_value(&item).unwrap();
        assert!(doc.get("dosage").is_none());
        assert_eq!(doc["type"], "supplies");
    }
}
