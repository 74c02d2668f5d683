//! Form-facing validators.
//!
//! Input arrives loosely typed (form fields, decoded scan payloads), so these
//! functions collect human-readable errors and produce a sanitized value only
//! when everything checks out. They never fail through `Result`; the report is
//! the result (messages are surfaced inline next to the offending field).

use serde::Deserialize;
use serde_json::Value as JsonValue;

use wardstock_core::{ItemId, Validated};

use crate::item::ItemKind;

/// Sentinel name recorded for scanned items that did not carry one.
pub const UNKNOWN_ITEM: &str = "Unknown Item";

/// A proposed deduction as it comes off the form, prior to validation.
///
/// `quantity_used` is raw JSON because form input can be a number, a numeric
/// string, or garbage.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUsageUpdate {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub quantity_used: Option<JsonValue>,
}

/// A sanitized, queueable deduction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageUpdate {
    pub id: ItemId,
    pub kind: ItemKind,
    pub quantity_used: u64,
}

/// Check a proposed inventory deduction before it is queued.
///
/// Fails when the id is missing, the type is not a recognized kind, or the
/// quantity is missing, non-numeric, or not positive.
pub fn validate_usage_update(raw: &RawUsageUpdate) -> Validated<UsageUpdate> {
    let mut errors = Vec::new();

    let id = match raw.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Some(ItemId::new(id)),
        _ => {
            errors.push("Missing item id".to_string());
            None
        }
    };

    let kind = match raw
        .kind
        .as_deref()
        .and_then(|k| k.trim().parse::<ItemKind>().ok())
    {
        Some(kind) => Some(kind),
        None => {
            errors.push("Invalid or missing item type".to_string());
            None
        }
    };

    let quantity_used = match raw.quantity_used.as_ref().and_then(coerce_quantity) {
        Some(quantity) if quantity > 0 => Some(quantity),
        _ => {
            errors.push("Quantity used must be a positive number".to_string());
            None
        }
    };

    match (id, kind, quantity_used) {
        (Some(id), Some(kind), Some(quantity_used)) => Validated::valid(UsageUpdate {
            id,
            kind,
            quantity_used,
        }),
        _ => Validated::invalid(errors),
    }
}

/// A freshly scanned item record, prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawScannedItem {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub quantity: Option<JsonValue>,
    #[serde(default)]
    pub retail_price: Option<JsonValue>,
}

/// A scanned item record after sanitization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedItem {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub quantity: u64,
    pub retail_price: u64,
}

/// Check a freshly scanned item record.
///
/// Same id/type/quantity rules as [`validate_usage_update`]; a missing name
/// falls back to [`UNKNOWN_ITEM`] and a missing price to 0.
pub fn validate_scanned_item(raw: &RawScannedItem) -> Validated<ScannedItem> {
    let mut errors = Vec::new();

    let id = match raw.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => Some(ItemId::new(id)),
        _ => {
            errors.push("Missing item id".to_string());
            None
        }
    };

    let kind = match raw
        .kind
        .as_deref()
        .and_then(|k| k.trim().parse::<ItemKind>().ok())
    {
        Some(kind) => Some(kind),
        None => {
            errors.push("Invalid or missing item type".to_string());
            None
        }
    };

    let quantity = match raw.quantity.as_ref().and_then(coerce_quantity) {
        Some(quantity) if quantity > 0 => Some(quantity),
        _ => {
            errors.push("Quantity must be a positive number".to_string());
            None
        }
    };

    let name = raw
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(UNKNOWN_ITEM)
        .to_string();

    let retail_price = raw
        .retail_price
        .as_ref()
        .and_then(coerce_quantity)
        .unwrap_or(0);

    match (id, kind, quantity) {
        (Some(id), Some(kind), Some(quantity)) => Validated::valid(ScannedItem {
            id,
            name,
            kind,
            quantity,
            retail_price,
        }),
        _ => Validated::invalid(errors),
    }
}

/// Coerce a raw JSON value to a non-negative integer quantity.
///
/// Accepts integers, integral floats, and numeric strings; everything else is
/// non-numeric.
fn coerce_quantity(value: &JsonValue) -> Option<u64> {
    match value {
        JsonValue::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        }),
        JsonValue::String(s) => {
            let s = s.trim();
            s.parse::<u64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
        }
        _ => None,
    }
}
