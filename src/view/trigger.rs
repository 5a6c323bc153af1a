//! Download trigger: the user-facing affordance that generates the PDF.
//!
//! At most one generation is in flight per trigger. The in-flight flag is
//! held by an RAII guard for the whole generation; a click that arrives
//! while it is held is ignored without touching the generator. Independent
//! triggers share nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::report::{DocumentArtifact, DocumentGenerator, ExportSchema, ReportError};

pub const IDLE_LABEL: &str = "Download as PDF";
pub const BUSY_LABEL: &str = "Generating...";
pub const FAILED_MESSAGE: &str = "PDF generation failed. Please try again.";

// ═══════════════════════════════════════════════════════════
// Types
// ═══════════════════════════════════════════════════════════

/// Trigger state as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerView {
    pub id: Uuid,
    pub label: &'static str,
    pub file_name: String,
    pub disabled: bool,
    /// Set after a failed generation until the next success.
    pub error: Option<&'static str>,
    /// When the most recent document was generated.
    pub generated_at: Option<DateTime<Utc>>,
}

/// Result of one click.
#[derive(Debug)]
pub enum ClickOutcome {
    Generated(DocumentArtifact),
    /// A generation was already in flight.
    Ignored,
    Failed(ReportError),
}

#[derive(Debug, Default)]
struct TriggerState {
    last_artifact: Option<DocumentArtifact>,
    failed: bool,
}

// ═══════════════════════════════════════════════════════════
// DownloadTrigger
// ═══════════════════════════════════════════════════════════

pub struct DownloadTrigger {
    id: Uuid,
    generator: Arc<dyn DocumentGenerator>,
    in_flight: AtomicBool,
    state: Mutex<TriggerState>,
}

impl DownloadTrigger {
    pub fn new(generator: Arc<dyn DocumentGenerator>) -> Self {
        Self {
            id: Uuid::new_v4(),
            generator,
            in_flight: AtomicBool::new(false),
            state: Mutex::new(TriggerState::default()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The most recent successfully generated document, if any.
    pub fn last_artifact(&self) -> Option<DocumentArtifact> {
        self.lock_state().last_artifact.clone()
    }

    /// Generates the document for `schema`.
    ///
    /// Generation runs on the blocking pool so the event loop keeps
    /// dispatching; a panic in the generator is reported as a render failure.
    pub async fn click(&self, schema: Arc<ExportSchema>) -> ClickOutcome {
        let Some(_guard) = self.try_begin() else {
            tracing::debug!(trigger_id = %self.id, "Generation already in flight; click ignored");
            return ClickOutcome::Ignored;
        };

        tracing::info!(
            trigger_id = %self.id,
            prescription_id = %schema.case_details.prescription_id,
            "Generating prescription document"
        );

        let generator = Arc::clone(&self.generator);
        let result = tokio::task::spawn_blocking(move || generator.generate(&schema))
            .await
            .unwrap_or_else(|e| Err(ReportError::Render(format!("generation task failed: {e}"))));

        let mut state = self.lock_state();
        match result {
            Ok(artifact) => {
                state.last_artifact = Some(artifact.clone());
                state.failed = false;
                ClickOutcome::Generated(artifact)
            }
            Err(e) => {
                tracing::warn!(trigger_id = %self.id, "Document generation failed: {e}");
                state.failed = true;
                ClickOutcome::Failed(e)
            }
        }
    }

    pub fn view(&self, file_name: &str) -> TriggerView {
        let busy = self.is_busy();
        let state = self.lock_state();
        TriggerView {
            id: self.id,
            label: if busy { BUSY_LABEL } else { IDLE_LABEL },
            file_name: file_name.to_string(),
            disabled: busy,
            error: (state.failed && !busy).then_some(FAILED_MESSAGE),
            generated_at: state.last_artifact.as_ref().map(|a| a.generated_at),
        }
    }

    // ── Internal ────────────────────────────────────────────

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        Some(InFlightGuard { flag: &self.in_flight })
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, TriggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// RAII in-flight token. Dropping it re-enables the trigger.
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
