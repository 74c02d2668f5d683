//! Inventory domain module.
//!
//! This crate contains the item model, the form-facing validators, and the
//! usage records, implemented purely as deterministic domain logic (no IO,
//! no storage). The store-facing workflow lives in `wardstock-workflow`.

pub mod item;
pub mod usage;
pub mod validate;

pub use item::{InventoryItem, ItemKind};
pub use usage::{ScannedUsageEntry, UsageHistoryRecord};
pub use validate::{
    RawScannedItem, RawUsageUpdate, ScannedItem, UsageUpdate, validate_scanned_item,
    validate_usage_update, UNKNOWN_ITEM,
};
