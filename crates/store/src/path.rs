//! Logical record paths.
//!
//! Paths address records in the remote document store. They are logical, not a
//! wire format: item records live under `inventory/{type}/{id}`, usage history
//! is an append-only list, and dashboards read the aggregate snapshot.

use wardstock_core::{ItemId, PatientId};

/// Append-only usage-history list.
pub const USAGE_HISTORY: &str = "inventory/usageHistory";

/// Aggregate inventory snapshot consumed by dashboards.
pub const OVERALL_INVENTORY: &str = "csr/overallInventory";

/// Prefix under which all item records live.
pub const INVENTORY_PREFIX: &str = "inventory/";

/// Prefix under which all patient intake records live.
pub const PATIENTS_PREFIX: &str = "patients/";

/// Path of one inventory item record.
pub fn item(kind: &str, id: &ItemId) -> String {
    format!("inventory/{kind}/{}", id.as_str())
}

/// Path of one patient intake record.
pub fn patient(id: &PatientId) -> String {
    format!("patients/{}", id.as_str())
}

/// Append-only prescription list for one patient.
pub fn prescriptions(patient_id: &PatientId) -> String {
    format!("prescriptions/{}", patient_id.as_str())
}
