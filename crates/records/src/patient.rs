use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use wardstock_core::{PatientId, Validated};
use wardstock_store::{RecordStore, RecordWrite, path};

use crate::RecordError;

/// A registered intake record, stored under `patients/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientIntake {
    pub patient_id: PatientId,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complaint: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// Intake form input, prior to validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPatientIntake {
    #[serde(default)]
    pub patient_id: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub complaint: Option<String>,
}

/// Check an intake form before registration.
///
/// The name is required; the date of birth must be `YYYY-MM-DD` when present;
/// a missing patient id gets a freshly minted one.
pub fn validate_patient_intake(
    raw: &RawPatientIntake,
    registered_at: DateTime<Utc>,
) -> Validated<PatientIntake> {
    let mut errors = Vec::new();

    let full_name = match raw.full_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => {
            errors.push("Missing patient name".to_string());
            None
        }
    };

    let mut date_of_birth = None;
    if let Some(dob) = raw
        .date_of_birth
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        match NaiveDate::parse_from_str(dob, "%Y-%m-%d") {
            Ok(date) => date_of_birth = Some(date),
            Err(_) => errors.push("Invalid date of birth (expected YYYY-MM-DD)".to_string()),
        }
    }

    let patient_id = match raw.patient_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => PatientId::new(id),
        _ => PatientId::generate(),
    };

    let trim_opt = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    match full_name {
        Some(full_name) if errors.is_empty() => Validated::valid(PatientIntake {
            patient_id,
            full_name,
            date_of_birth,
            sex: trim_opt(&raw.sex),
            phone: trim_opt(&raw.phone),
            complaint: trim_opt(&raw.complaint),
            registered_at,
        }),
        _ => Validated::invalid(errors),
    }
}

/// Thin keyed accessor for patient intake records.
#[derive(Debug)]
pub struct PatientDirectory<S> {
    store: S,
}

impl<S: RecordStore> PatientDirectory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new patient. Registering an id that already exists is a
    /// conflict, not an overwrite.
    pub fn register(&self, intake: &PatientIntake) -> Result<(), RecordError> {
        let payload = serde_json::to_value(intake)
            .map_err(|e| RecordError::Serialization(e.to_string()))?;

        self.store.put(RecordWrite {
            path: path::patient(&intake.patient_id),
            payload,
            expected_version: Some(0),
        })?;

        tracing::info!(patient = %intake.patient_id, "patient registered");
        Ok(())
    }

    pub fn fetch(&self, id: &PatientId) -> Result<Option<PatientIntake>, RecordError> {
        match self.store.get(&path::patient(id))? {
            Some(record) => serde_json::from_value(record.payload)
                .map(Some)
                .map_err(|e| RecordError::Serialization(e.to_string())),
            None => Ok(None),
        }
    }

    /// Every registered patient, in id order.
    pub fn all(&self) -> Result<Vec<PatientIntake>, RecordError> {
        self.store
            .list_prefix(path::PATIENTS_PREFIX)?
            .into_iter()
            .map(|record| {
                serde_json::from_value(record.payload)
                    .map_err(|e| RecordError::Serialization(e.to_string()))
            })
            .collect()
    }
}
