//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Create the upload directory if missing; warn when the optional static
/// frontend directory is configured but absent.
pub async fn ensure_env(upload_dir: &Path, static_dir: Option<&Path>) -> anyhow::Result<()> {
    if let Some(dir) = static_dir {
        if tokio::fs::metadata(dir).await.is_err() {
            warn!(static_dir = %dir.display(), "frontend assets directory not found; static assets may 404");
        }
    }
    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", upload_dir.display()))?;
    info!(upload_dir = %upload_dir.display(), "upload directory ready");
    Ok(())
}
