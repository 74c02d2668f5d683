//! Demo binary: seeds an in-memory store and walks one full
//! intake → scan → commit session, then refreshes the dashboard aggregate.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;

use serde_json::json;
use wardstock_core::ItemId;
use wardstock_inventory::{
    InventoryItem, ItemKind, RawUsageUpdate, ScannedUsageEntry, validate_usage_update,
};
use wardstock_records::{PatientDirectory, RawPatientIntake, validate_patient_intake};
use wardstock_reports::refresh_overall_inventory;
use wardstock_store::{InMemoryRecordStore, RecordStore, RecordWrite, path};
use wardstock_workflow::{
    SessionAction, SessionState, UsageCommitter, lookup_scanned_item, reduce,
};

const LOW_STOCK_THRESHOLD: u64 = 10;

fn main() -> Result<()> {
    wardstock_observability::init();

    let store = Arc::new(InMemoryRecordStore::new());
    seed(store.as_ref())?;

    // Intake.
    let intake_form = RawPatientIntake {
        full_name: Some("Amina Yusuf".to_string()),
        complaint: Some("Laceration, left forearm".to_string()),
        ..RawPatientIntake::default()
    };
    let intake = validate_patient_intake(&intake_form, Utc::now())
        .into_sanitized()
        .context("intake form failed validation")?;

    let directory = PatientDirectory::new(store.clone());
    directory.register(&intake)?;

    // Scan a few items into the session queue.
    let mut session = SessionState::new(intake.patient_id.clone());
    for (kind, id, quantity) in [
        (ItemKind::Supplies, "4006381333931", 2),
        (ItemKind::Supplies, "4006381333931", 1),
        (ItemKind::Medicines, "8901030865278", 4),
    ] {
        let entry = scan(store.as_ref(), kind, id, quantity)?;
        session = reduce(session, SessionAction::ItemScanned(entry));
        if !session.errors.is_empty() {
            tracing::warn!(errors = ?session.errors, "scan rejected");
        }
    }

    // Commit the queue as one batch.
    session = reduce(session, SessionAction::CommitStarted);
    let committer = UsageCommitter::new(store.clone());
    match committer.commit(&intake.patient_id, &session.queue) {
        Ok(commit) => {
            session = reduce(session, SessionAction::CommitSucceeded);
            tracing::info!(
                items = commit.items_updated,
                history = commit.records_appended,
                "session committed"
            );
        }
        Err(err) => {
            session = reduce(
                session,
                SessionAction::CommitFailed {
                    reason: err.to_string(),
                },
            );
            return Err(err).context("usage commit failed");
        }
    }
    tracing::debug!(phase = ?session.phase, queued = session.queue.len(), "session finished");

    // Refresh the dashboard aggregate.
    let overall = refresh_overall_inventory(store.as_ref(), LOW_STOCK_THRESHOLD)?;
    tracing::info!(
        supplies = overall.supplies_quantity,
        medicines = overall.medicines_quantity,
        low_stock = overall.low_stock.len(),
        "overall inventory refreshed"
    );

    Ok(())
}

/// Validate the form input, resolve the scan payload, and confirm a quantity.
fn scan(
    store: &InMemoryRecordStore,
    kind: ItemKind,
    payload: &str,
    quantity: u64,
) -> Result<ScannedUsageEntry> {
    let form = RawUsageUpdate {
        id: Some(payload.to_string()),
        kind: Some(kind.as_str().to_string()),
        quantity_used: Some(json!(quantity)),
    };
    let update = validate_usage_update(&form)
        .into_result()
        .map_err(|errors| anyhow::anyhow!("scan form rejected: {}", errors.join("; ")))?;

    let item = lookup_scanned_item(store, update.kind, update.id.as_str())?;
    Ok(ScannedUsageEntry::from_scan(&item, update.quantity_used, Utc::now())?)
}

fn seed(store: &InMemoryRecordStore) -> Result<()> {
    let mut gauze = InventoryItem::new(
        ItemId::new("4006381333931"),
        ItemKind::Supplies,
        "Sterile Gauze Pads",
        24,
    );
    gauze.retail_price = 150;
    gauze.brand = Some("MediWrap".to_string());

    let mut paracetamol = InventoryItem::new(
        ItemId::new("8901030865278"),
        ItemKind::Medicines,
        "Paracetamol 500mg",
        40,
    );
    paracetamol.retail_price = 250;
    paracetamol.dosage = Some("500mg".to_string());
    paracetamol.instructions = Some("After meals".to_string());

    let mut gloves = InventoryItem::new(
        ItemId::new("0736983201112"),
        ItemKind::Supplies,
        "Nitrile Gloves (M)",
        8,
    );
    gloves.retail_price = 30;

    for item in [gauze, paracetamol, gloves] {
        store.put(RecordWrite {
            path: path::item(item.kind.as_str(), &item.id),
            payload: serde_json::to_value(&item)?,
            expected_version: Some(0),
        })?;
    }

    Ok(())
}
