use serde::{Deserialize, Serialize};

use wardstock_core::PatientId;
use wardstock_inventory::ScannedUsageEntry;

use crate::queue::ScanQueue;

/// Where a session currently is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Scanning,
    Committing,
    Committed,
    Failed { reason: String },
}

/// One department/patient usage session.
///
/// `errors` holds the inline messages produced by the most recent action; they
/// are display state, not a failure channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub patient_id: PatientId,
    pub queue: ScanQueue,
    pub phase: SessionPhase,
    pub errors: Vec<String>,
}

impl SessionState {
    pub fn new(patient_id: PatientId) -> Self {
        Self {
            patient_id,
            queue: ScanQueue::new(),
            phase: SessionPhase::Scanning,
            errors: Vec::new(),
        }
    }

    fn accepts_edits(&self) -> bool {
        matches!(
            self.phase,
            SessionPhase::Scanning | SessionPhase::Failed { .. }
        )
    }
}

/// Everything that can happen to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionAction {
    ItemScanned(ScannedUsageEntry),
    EntryRemoved { index: usize },
    QueueCleared,
    CommitStarted,
    CommitSucceeded,
    CommitFailed { reason: String },
}

/// Pure, total state transition.
///
/// Rejected edits land in `state.errors` instead of failing; a failed commit
/// leaves the queue intact so the session can retry.
pub fn reduce(mut state: SessionState, action: SessionAction) -> SessionState {
    state.errors.clear();

    match action {
        SessionAction::ItemScanned(entry) => {
            if !state.accepts_edits() {
                state.errors.push("session is no longer scanning".to_string());
            } else if let Err(err) = state.queue.enqueue(entry) {
                state.errors.push(err.to_string());
            }
        }
        SessionAction::EntryRemoved { index } => {
            if !state.accepts_edits() {
                state.errors.push("session is no longer scanning".to_string());
            } else if state.queue.remove(index).is_none() {
                state.errors.push(format!("no queued entry at position {index}"));
            }
        }
        SessionAction::QueueCleared => {
            if !state.accepts_edits() {
                state.errors.push("session is no longer scanning".to_string());
            } else {
                state.queue.clear();
            }
        }
        SessionAction::CommitStarted => {
            state.phase = SessionPhase::Committing;
        }
        SessionAction::CommitSucceeded => {
            state.queue.clear();
            state.phase = SessionPhase::Committed;
        }
        SessionAction::CommitFailed { reason } => {
            state.phase = SessionPhase::Failed { reason };
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use wardstock_core::ItemId;
    use wardstock_inventory::{InventoryItem, ItemKind};

    fn entry(available: u64, used: u64) -> ScannedUsageEntry {
        let item = InventoryItem::new(ItemId::new("7"), ItemKind::Supplies, "Gauze", available);
        ScannedUsageEntry::new(&item, used, Utc::now()).unwrap()
    }

    fn session() -> SessionState {
        SessionState::new(PatientId::new("p-1"))
    }

    #[test]
    fn scans_accumulate_in_the_queue() {
        let state = reduce(session(), SessionAction::ItemScanned(entry(10, 2)));
        let state = reduce(state, SessionAction::ItemScanned(entry(10, 3)));
        assert_eq!(state.queue.len(), 2);
        assert!(state.errors.is_empty());
    }

    #[test]
    fn rejected_scan_surfaces_inline_and_leaves_queue_unchanged() {
        let state = reduce(session(), SessionAction::ItemScanned(entry(10, 8)));
        let state = reduce(state, SessionAction::ItemScanned(entry(10, 8)));
        assert_eq!(state.queue.len(), 1);
        assert_eq!(state.errors.len(), 1);
        assert_eq!(state.phase, SessionPhase::Scanning);
    }

    #[test]
    fn next_action_clears_old_inline_errors() {
        let state = reduce(session(), SessionAction::ItemScanned(entry(10, 8)));
        let state = reduce(state, SessionAction::ItemScanned(entry(10, 8)));
        assert!(!state.errors.is_empty());

        let state = reduce(state, SessionAction::ItemScanned(entry(10, 2)));
        assert!(state.errors.is_empty());
    }

    #[test]
    fn successful_commit_clears_the_queue() {
        let state = reduce(session(), SessionAction::ItemScanned(entry(10, 2)));
        let state = reduce(state, SessionAction::CommitStarted);
        assert_eq!(state.phase, SessionPhase::Committing);

        let state = reduce(state, SessionAction::CommitSucceeded);
        assert!(state.queue.is_empty());
        assert_eq!(state.phase, SessionPhase::Committed);
    }

    #[test]
    fn failed_commit_keeps_the_queue_for_retry() {
        let state = reduce(session(), SessionAction::ItemScanned(entry(10, 2)));
        let state = reduce(state, SessionAction::CommitStarted);
        let state = reduce(
            state,
            SessionAction::CommitFailed {
                reason: "version conflict".to_string(),
            },
        );

        assert_eq!(state.queue.len(), 1);
        assert!(matches!(state.phase, SessionPhase::Failed { .. }));

        // A failed session can keep editing and retry.
        let state = reduce(state, SessionAction::ItemScanned(entry(10, 3)));
        assert_eq!(state.queue.len(), 2);
    }

    #[test]
    fn committed_session_rejects_further_edits() {
        let state = reduce(session(), SessionAction::ItemScanned(entry(10, 2)));
        let state = reduce(state, SessionAction::CommitStarted);
        let state = reduce(state, SessionAction::CommitSucceeded);

        let state = reduce(state, SessionAction::ItemScanned(entry(10, 1)));
        assert!(state.queue.is_empty());
        assert_eq!(state.errors.len(), 1);
    }
}
