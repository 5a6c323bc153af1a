//! Prescription export: record projection, PDF layout and delivery.
//!
//! The export schema is the only data that leaves the application. It is
//! assembled from a [`ConsultationRecord`](crate::models::ConsultationRecord)
//! by [`assembler::assemble`], rendered by [`renderer::render`] and written
//! out by [`export::export_pdf_to_file`].

pub mod assembler;
pub mod export;
pub mod renderer;

pub use assembler::assemble;
pub use renderer::{file_name, render, render_json, DocumentGenerator, PdfGenerator};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Medication, PatientProfile};

// ─── Types ────────────────────────────────────────────────────────────────────

/// Case fields that are allowed into the exported document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseDetails {
    pub prescription_id: String,
    pub date: String,
    pub ai_summary: String,
    pub ai_diagnosis: String,
    pub medical_history: String,
    pub doctor_name: String,
}

/// Stable projection of a consultation record intended for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSchema {
    pub patient: PatientProfile,
    pub medications: Vec<Medication>,
    pub case_details: CaseDetails,
}

/// A generated document, ready to hand to the download surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReportError {
    #[error("Consultation record is missing required field: {field}")]
    IncompleteRecord { field: &'static str },

    #[error("PDF generation failed: {0}")]
    Render(String),

    #[error("Document generation is not available in this environment yet")]
    EnvironmentNotReady,

    #[error("Export failed: {0}")]
    Export(String),
}
