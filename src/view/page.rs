//! Prescription page: view types serialised to the host UI, plus the page
//! controller that owns the lifecycle and the download trigger.

use std::sync::Arc;

use serde::Serialize;

use crate::models::{ConsultationRecord, Medication, PatientProfile, PrescriptionStatus};
use crate::report::{self, DocumentGenerator, ExportSchema, PdfGenerator, ReportError};

use super::lifecycle::{MountState, PendingActivation, RenderEnvironment, ViewLifecycle};
use super::status::{status_card, StatusCard};
use super::trigger::{ClickOutcome, DownloadTrigger, TriggerView};

const UNAVAILABLE: &str = "Unavailable";
const NO_UPLOADS: &str = "No images were uploaded for this consultation.";
const NO_MEDICATIONS: &str = "Medication list unavailable for this consultation.";

/// Lead-in above the medication table, consistent with the status card.
fn table_description(status: PrescriptionStatus) -> &'static str {
    match status {
        PrescriptionStatus::Approved => {
            "This prescription has been approved by your doctor. Follow the instructions carefully."
        }
        PrescriptionStatus::Pending => {
            "This prescription is awaiting your doctor's review. Do not start these medications until it is approved."
        }
        PrescriptionStatus::Rejected => {
            "This prescription was not approved by your doctor. Do not follow these instructions."
        }
    }
}

// ═══════════════════════════════════════════
// View types, serialised to the host UI
// ═══════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionPageView {
    pub heading: String,
    pub subheading: String,
    /// Present only once the view is ready to generate documents.
    pub download: Option<TriggerView>,
    /// Why export is unavailable, when the record is incomplete.
    pub export_notice: Option<String>,
    pub status: StatusCard,
    pub consultation: ConsultationView,
    pub symptom_summary: String,
    pub diagnosis: String,
    pub transcript: String,
    pub uploads: UploadsView,
    pub prescription: MedicationTableView,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultationView {
    pub patient_details: String,
    pub physician: String,
    pub allergies_and_history: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadsView {
    pub files: Vec<String>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationTableView {
    pub description: &'static str,
    pub rows: Vec<MedicationRowView>,
    pub empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicationRowView {
    pub id: u32,
    pub name: String,
    pub badge: Option<&'static str>,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

impl From<&Medication> for MedicationRowView {
    fn from(med: &Medication) -> Self {
        Self {
            id: med.id,
            name: med.name.clone(),
            badge: med.is_existing.then_some(report::renderer::EXISTING_MARKER),
            dosage: med.dosage.clone(),
            frequency: med.frequency.clone(),
            duration: med.duration.clone(),
        }
    }
}

// ═══════════════════════════════════════════
// PrescriptionPage
// ═══════════════════════════════════════════

/// One live view of one consultation record.
pub struct PrescriptionPage {
    record: ConsultationRecord,
    schema: Result<Arc<ExportSchema>, ReportError>,
    lifecycle: Arc<ViewLifecycle>,
    trigger: DownloadTrigger,
}

impl PrescriptionPage {
    pub fn new(record: ConsultationRecord, generator: Arc<dyn DocumentGenerator>) -> Self {
        let schema = report::assemble(&record).map(Arc::new);
        if let Err(e) = &schema {
            tracing::warn!("Prescription export unavailable: {e}");
        }
        Self {
            record,
            schema,
            lifecycle: ViewLifecycle::new(),
            trigger: DownloadTrigger::new(generator),
        }
    }

    /// Page backed by the `printpdf` renderer.
    pub fn with_pdf(record: ConsultationRecord) -> Self {
        Self::new(record, Arc::new(PdfGenerator))
    }

    pub fn state(&self) -> MountState {
        self.lifecycle.state()
    }

    pub fn schema(&self) -> Result<&ExportSchema, ReportError> {
        self.schema.as_deref().map_err(|e| e.clone())
    }

    pub fn mount(&self, environment: RenderEnvironment) -> Option<PendingActivation> {
        self.lifecycle.mount(environment)
    }

    /// Builds the page view for the current lifecycle state.
    pub fn render(&self) -> PrescriptionPageView {
        let details = &self.record.details;
        let patient = self.record.patient.as_ref();

        let download = match (&self.schema, self.lifecycle.state()) {
            (Ok(schema), MountState::MountedReady) => Some(
                self.trigger
                    .view(&report::file_name(&schema.case_details.prescription_id)),
            ),
            (_, MountState::Unmounted | MountState::MountedNotReady) | (Err(_), _) => None,
        };

        let allergies = patient
            .map(PatientProfile::allergy_line)
            .unwrap_or_else(|| UNAVAILABLE.to_string());

        PrescriptionPageView {
            heading: match patient {
                Some(p) => format!("Prescription for {}", p.name),
                None => "Prescription".to_string(),
            },
            subheading: format!(
                "Prescription ID: {} | Issued on: {}",
                details.prescription_id.as_deref().unwrap_or(UNAVAILABLE),
                details.date.as_deref().unwrap_or(UNAVAILABLE),
            ),
            download,
            export_notice: self.schema.as_ref().err().map(ToString::to_string),
            status: status_card(
                details.status,
                &details.doctor_name,
                details.rejection_reason.as_deref(),
            ),
            consultation: ConsultationView {
                patient_details: patient
                    .map(|p| {
                        format!(
                            "{} years old • {} • {} • {}",
                            p.age, p.gender, p.height, p.weight
                        )
                    })
                    .unwrap_or_else(|| "Patient details unavailable".to_string()),
                physician: details.doctor_name.clone(),
                allergies_and_history: format!("{allergies} • {}", details.medical_history),
            },
            symptom_summary: details.ai_summary.clone(),
            diagnosis: details.ai_diagnosis.clone(),
            transcript: details.transcript.clone(),
            uploads: UploadsView {
                files: details.uploads.clone(),
                empty_message: details.uploads.is_empty().then_some(NO_UPLOADS),
            },
            prescription: MedicationTableView {
                description: table_description(details.status),
                rows: self
                    .record
                    .medications
                    .iter()
                    .flatten()
                    .map(MedicationRowView::from)
                    .collect(),
                empty_message: self.record.medications.is_none().then_some(NO_MEDICATIONS),
            },
        }
    }

    /// Clicks the download trigger.
    ///
    /// The rendered view never exposes the trigger before `MountedReady`;
    /// direct callers get `EnvironmentNotReady` instead.
    pub async fn download(&self) -> Result<ClickOutcome, ReportError> {
        if !self.lifecycle.is_ready() {
            return Err(ReportError::EnvironmentNotReady);
        }
        let schema = self.schema.clone()?;
        Ok(self.trigger.click(schema).await)
    }

    /// The last document generated from this page, if any.
    pub fn last_document(&self) -> Option<report::DocumentArtifact> {
        self.trigger.last_artifact()
    }

    /// Tears the view down. Pending activations become no-ops.
    pub fn teardown(self) {
        tracing::debug!(trigger_id = %self.trigger.id(), "Prescription view torn down");
    }
}
