//! Patient intake and prescription records.
//!
//! Thin keyed accessors over the record store: validate, serialize, read or
//! write by path. No business logic lives here beyond record validation.

pub mod patient;
pub mod prescription;

pub use patient::{PatientDirectory, PatientIntake, RawPatientIntake, validate_patient_intake};
pub use prescription::{Prescription, PrescriptionLine, PrescriptionPad};

use thiserror::Error;

use wardstock_store::StoreError;

/// Record access failure.
#[derive(Debug, Error)]
pub enum RecordError {
    /// The record failed validation; messages are surfaced inline on the form.
    #[error("record rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
