pub mod config;
pub mod models;
pub mod report; // Record Assembler + Document Renderer
pub mod view; // Page model, lifecycle, download trigger

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use crate::models::ConsultationRecord;
use crate::report::ReportError;
use crate::view::{ClickOutcome, PrescriptionPage, RenderEnvironment};

/// Host entry point: `sanjeevan <record.json>`.
///
/// Loads the record, mounts the page in the client environment, prints the
/// page view as JSON and exports the generated PDF.
pub fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let path = std::env::args()
        .nth(1)
        .context("usage: sanjeevan <record.json>")?;
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read consultation record {path}"))?;
    let record = ConsultationRecord::from_json(&json)
        .with_context(|| format!("invalid consultation record {path}"))?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("cannot start event loop")?;

    runtime.block_on(async move {
        let page = PrescriptionPage::with_pdf(record);
        if let Some(pending) = page.mount(RenderEnvironment::Client) {
            pending.resolve().await;
        }

        println!("{}", serde_json::to_string_pretty(&page.render())?);

        deliver(&page, &config::exports_dir()).await?;
        page.teardown();
        Ok::<(), anyhow::Error>(())
    })
}

/// Clicks the page's download trigger and writes the document to `exports_dir`.
///
/// Generation problems stay with the view: they are logged and give
/// `Ok(None)`. Only a failed write is returned as an error.
pub async fn deliver(
    page: &PrescriptionPage,
    exports_dir: &Path,
) -> Result<Option<PathBuf>, ReportError> {
    match page.download().await {
        Ok(ClickOutcome::Generated(artifact)) => {
            let path = report::export::export_artifact(&artifact, exports_dir)?;
            tracing::info!(path = %path.display(), "Prescription ready");
            Ok(Some(path))
        }
        Ok(ClickOutcome::Failed(e)) | Err(e) => {
            tracing::warn!("Prescription not exported: {e}");
            Ok(None)
        }
        Ok(ClickOutcome::Ignored) => Ok(None),
    }
}
