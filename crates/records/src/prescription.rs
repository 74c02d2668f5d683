use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use wardstock_core::{ItemId, PatientId};
use wardstock_store::{RecordStore, path};

use crate::RecordError;

/// One prescribed medicine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionLine {
    /// Inventory item the medicine maps to, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    pub medicine_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    pub quantity: u64,
}

/// A prescription issued during a visit, appended under
/// `prescriptions/{patientId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub patient_id: PatientId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prescriber: Option<String>,
    pub lines: Vec<PrescriptionLine>,
    pub prescribed_at: DateTime<Utc>,
}

fn check(prescription: &Prescription) -> Vec<String> {
    let mut errors = Vec::new();

    if prescription.lines.is_empty() {
        errors.push("Prescription needs at least one line".to_string());
    }
    for (i, line) in prescription.lines.iter().enumerate() {
        if line.medicine_name.trim().is_empty() {
            errors.push(format!("Line {}: missing medicine name", i + 1));
        }
        if line.quantity == 0 {
            errors.push(format!("Line {}: quantity must be greater than zero", i + 1));
        }
    }

    errors
}

/// Append-only prescription access for one store.
#[derive(Debug)]
pub struct PrescriptionPad<S> {
    store: S,
}

impl<S: RecordStore> PrescriptionPad<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate and append a prescription to the patient's list.
    pub fn issue(&self, prescription: &Prescription) -> Result<(), RecordError> {
        let errors = check(prescription);
        if !errors.is_empty() {
            return Err(RecordError::Rejected(errors));
        }

        let payload = serde_json::to_value(prescription)
            .map_err(|e| RecordError::Serialization(e.to_string()))?;

        self.store
            .append(&path::prescriptions(&prescription.patient_id), payload)?;

        tracing::info!(
            patient = %prescription.patient_id,
            lines = prescription.lines.len(),
            "prescription issued"
        );
        Ok(())
    }

    /// Every prescription issued to one patient, oldest first.
    pub fn for_patient(&self, id: &PatientId) -> Result<Vec<Prescription>, RecordError> {
        self.store
            .read_list(&path::prescriptions(id))?
            .into_iter()
            .map(|payload| {
                serde_json::from_value(payload)
                    .map_err(|e| RecordError::Serialization(e.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardstock_store::InMemoryRecordStore;

    fn paracetamol(quantity: u64) -> PrescriptionLine {
        PrescriptionLine {
            item_id: Some(ItemId::new("8901030865278")),
            medicine_name: "Paracetamol 500mg".to_string(),
            dosage: Some("1 tablet".to_string()),
            instructions: Some("After meals".to_string()),
            quantity,
        }
    }

    fn prescription(lines: Vec<PrescriptionLine>) -> Prescription {
        Prescription {
            patient_id: PatientId::new("p-1"),
            prescriber: Some("Dr. Mensah".to_string()),
            lines,
            prescribed_at: Utc::now(),
        }
    }

    #[test]
    fn issue_then_read_back_in_order() {
        let store = InMemoryRecordStore::new();
        let pad = PrescriptionPad::new(&store);

        pad.issue(&prescription(vec![paracetamol(10)])).unwrap();
        pad.issue(&prescription(vec![paracetamol(20)])).unwrap();

        let issued = pad.for_patient(&PatientId::new("p-1")).unwrap();
        assert_eq!(issued.len(), 2);
        assert_eq!(issued[0].lines[0].quantity, 10);
        assert_eq!(issued[1].lines[0].quantity, 20);
    }

    #[test]
    fn empty_prescription_is_rejected() {
        let store = InMemoryRecordStore::new();
        let pad = PrescriptionPad::new(&store);

        let err = pad.issue(&prescription(Vec::new())).unwrap_err();
        assert!(matches!(err, RecordError::Rejected(_)));
        assert!(pad.for_patient(&PatientId::new("p-1")).unwrap().is_empty());
    }

    #[test]
    fn zero_quantity_line_is_rejected_with_its_position() {
        let store = InMemoryRecordStore::new();
        let pad = PrescriptionPad::new(&store);

        let err = pad
            .issue(&prescription(vec![paracetamol(10), paracetamol(0)]))
            .unwrap_err();
        match err {
            RecordError::Rejected(errors) => {
                assert!(errors.iter().any(|e| e.starts_with("Line 2:")));
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn unknown_patient_has_no_prescriptions() {
        let store = InMemoryRecordStore::new();
        let pad = PrescriptionPad::new(&store);
        assert!(pad.for_patient(&PatientId::new("nobody")).unwrap().is_empty());
    }
}
