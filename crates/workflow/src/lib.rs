//! Usage workflow: scan queue, session reducer, and the atomic commit step.
//!
//! Data flow: scan → validate → queue (in-memory) → confirm quantity per item
//! → commit, which applies every queued deduction and its history records as
//! one batched write against the record store.

pub mod commit;
pub mod queue;
pub mod scan;
pub mod session;

pub use commit::{CommitError, UsageCommit, UsageCommitter};
pub use queue::{ItemDeduction, ScanQueue};
pub use scan::{ScanError, lookup_scanned_item};
pub use session::{SessionAction, SessionPhase, SessionState, reduce};
