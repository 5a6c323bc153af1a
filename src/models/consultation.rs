use serde::{Deserialize, Serialize};

use super::enums::PrescriptionStatus;
use super::medication::Medication;
use super::patient::PatientProfile;

/// Full in-memory consultation details, including fields that never leave
/// the application (status, rejection reason, transcript, confidence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationDetails {
    pub prescription_id: Option<String>,
    /// Display string, e.g. "June 07, 2025".
    pub date: Option<String>,
    pub status: PrescriptionStatus,
    pub doctor_name: String,
    /// Only meaningful when `status` is `Rejected`.
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub ai_summary: String,
    #[serde(default)]
    pub ai_diagnosis: String,
    #[serde(default)]
    pub medical_history: String,
    #[serde(default)]
    pub transcript: String,
    /// Advisory model confidence, 0-100. Reserved: no view or export reads it.
    #[serde(default)]
    pub confidence: f64,
    /// Names of images the patient uploaded during the consultation.
    #[serde(default)]
    pub uploads: Vec<String>,
}

/// One patient visit as handed over by the data-loading collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationRecord {
    #[serde(rename = "caseDetails")]
    pub details: ConsultationDetails,
    #[serde(default)]
    pub patient: Option<PatientProfile>,
    #[serde(default)]
    pub medications: Option<Vec<Medication>>,
}

impl ConsultationRecord {
    /// Parse a record from its JSON wire form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
