//! Delivery of a generated document into the exports directory.

use std::path::{Path, PathBuf};

use super::{DocumentArtifact, ReportError};

/// Saves PDF bytes as `exports_dir/filename`, creating the directory.
pub fn export_pdf_to_file(
    pdf_bytes: &[u8],
    filename: &str,
    exports_dir: &Path,
) -> Result<PathBuf, ReportError> {
    if filename.is_empty()
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains("..")
    {
        return Err(ReportError::Export(format!("Invalid file name: {filename}")));
    }

    std::fs::create_dir_all(exports_dir)
        .map_err(|e| ReportError::Export(format!("Cannot create exports dir: {e}")))?;

    let path = exports_dir.join(filename);
    std::fs::write(&path, pdf_bytes)
        .map_err(|e| ReportError::Export(format!("Cannot write PDF: {e}")))?;

    tracing::info!(path = %path.display(), size = pdf_bytes.len(), "Exported prescription PDF");
    Ok(path)
}

/// Saves an artifact under its own suggested file name.
pub fn export_artifact(artifact: &DocumentArtifact, exports_dir: &Path) -> Result<PathBuf, ReportError> {
    let path = export_pdf_to_file(&artifact.bytes, &artifact.file_name, exports_dir)?;
    tracing::debug!(
        path = %path.display(),
        generated_at = %artifact.generated_at.to_rfc3339(),
        "Delivered prescription document"
    );
    Ok(path)
}
