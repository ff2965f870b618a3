//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` to keep binary crates importing
//! `service::runtime::ensure_env` without depending directly on `common`.

use std::path::Path;

/// Ensure the upload directory exists; warn on a missing static frontend.
pub async fn ensure_env(upload_dir: &Path, static_dir: Option<&Path>) -> anyhow::Result<()> {
    common::env::ensure_env(upload_dir, static_dir).await
}
