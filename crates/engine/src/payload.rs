//! Document-generation request assembled from the current rows.
//!
//! Field names are camelCase to match the document endpoint.

use rxpad_types::Row;
use serde::{Deserialize, Serialize};

use crate::row_store::RowStore;

pub const DEFAULT_GENDER: &str = "Male";
pub const DEFAULT_ALLERGIES: &str = "NKDA (No Known Drug Allergies)";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatientDetails {
    pub patient_name: String,
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub bp: String,
    pub allergies: String,
    pub diagnosis: String,
    pub follow_up_date: String,
    pub follow_up_reason: String,
}

impl Default for PatientDetails {
    fn default() -> Self {
        Self {
            patient_name: String::new(),
            age: String::new(),
            gender: DEFAULT_GENDER.to_string(),
            weight: String::new(),
            bp: String::new(),
            allergies: DEFAULT_ALLERGIES.to_string(),
            diagnosis: String::new(),
            follow_up_date: String::new(),
            follow_up_reason: String::new(),
        }
    }
}

/// One medicine line as the document renders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineLine {
    pub name: String,
    pub generic: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
    pub timing: String,
    pub remarks: String,
}

impl From<&Row> for MedicineLine {
    fn from(row: &Row) -> Self {
        let details = &row.details;
        let days = details.duration.trim();
        Self {
            name: row.query_text.clone(),
            generic: row.resolved_generic.label().to_string(),
            dosage: details.dosage.clone(),
            frequency: details.frequency.clone(),
            duration: if days.is_empty() { String::new() } else { format!("{days} Days") },
            timing: details.timing.clone(),
            remarks: details.remarks.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionRequest {
    #[serde(flatten)]
    pub patient: PatientDetails,
    pub medicines: Vec<MedicineLine>,
}

impl PrescriptionRequest {
    /// Build the request from every row, in insertion order.
    pub fn from_rows(patient: PatientDetails, rows: &RowStore) -> Self {
        Self {
            patient,
            medicines: rows.iter().map(MedicineLine::from).collect(),
        }
    }
}
