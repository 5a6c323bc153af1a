use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Sanjeevan";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prefix of every exported document file name.
pub const PRODUCT_PREFIX: &str = APP_NAME;

/// Extension of the exported document format.
pub const DOCUMENT_EXTENSION: &str = "pdf";

/// Overrides the exports directory when set.
pub const EXPORT_DIR_ENV: &str = "SANJEEVAN_EXPORT_DIR";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "info,sanjeevan_lib=debug"
}

/// Get the directory exported prescriptions are written to.
///
/// `$SANJEEVAN_EXPORT_DIR` if set, otherwise `~/Downloads/Sanjeevan/`,
/// falling back to the home directory and then the working directory.
pub fn exports_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(EXPORT_DIR_ENV) {
        if !dir.trim().is_empty() {
            return PathBuf::from(dir);
        }
    }
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}
