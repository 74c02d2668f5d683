//! Read-side aggregates over inventory, usage history, and intake records.
//!
//! Everything here is rebuildable from the underlying records; nothing is a
//! source of truth.

pub mod overall;
pub mod traffic;
pub mod usage;

pub use overall::{LowStockItem, OverallInventory, refresh_overall_inventory};
pub use traffic::{daily_visits, peak_day};
pub use usage::{ItemUsageSummary, daily_usage, summarize_usage};
