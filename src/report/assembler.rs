//! Record Assembler: projects a consultation record onto the export schema.
//!
//! Status, rejection reason, transcript, confidence and uploads are
//! in-application only and are never copied across.

use crate::models::ConsultationRecord;

use super::{CaseDetails, ExportSchema, ReportError};

/// Builds the export schema for `record`. No I/O, no side effects.
pub fn assemble(record: &ConsultationRecord) -> Result<ExportSchema, ReportError> {
    let details = &record.details;

    let prescription_id = details
        .prescription_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(ReportError::IncompleteRecord { field: "prescriptionId" })?;
    let date = details
        .date
        .as_deref()
        .ok_or(ReportError::IncompleteRecord { field: "date" })?;
    let patient = record
        .patient
        .as_ref()
        .ok_or(ReportError::IncompleteRecord { field: "patient" })?;
    let medications = record
        .medications
        .as_ref()
        .ok_or(ReportError::IncompleteRecord { field: "medications" })?;

    Ok(ExportSchema {
        patient: patient.clone(),
        medications: medications.clone(),
        case_details: CaseDetails {
            prescription_id: prescription_id.to_string(),
            date: date.to_string(),
            ai_summary: details.ai_summary.clone(),
            ai_diagnosis: details.ai_diagnosis.clone(),
            medical_history: details.medical_history.clone(),
            doctor_name: details.doctor_name.clone(),
        },
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
