//! File storage for uploaded payloads.
//!
//! The store directory is the only source of truth: every regular file in it
//! is one [`StoredFile`], named by its storage key. Callers work against the
//! [`FileStore`] trait so the local directory can be swapped for another
//! backend.

pub mod key;
pub mod format;
pub mod local_fs;

use std::path::PathBuf;
use std::pin::Pin;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::io::AsyncRead;

use crate::errors::ServiceError;

pub use format::{format_size, format_upload_time};
pub use key::{generate_storage_key, is_valid_storage_key, original_name_of, sanitize_original_name};
pub use local_fs::LocalFileStore;

/// Metadata of one stored payload, derived from the live store on each call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredFile {
    pub storage_key: String,
    pub original_name: String,
    pub size_bytes: u64,
    pub created_at: DateTime<Utc>,
}

impl StoredFile {
    pub fn size_formatted(&self) -> String {
        format_size(self.size_bytes)
    }
}

pub type FileReader = Pin<Box<dyn AsyncRead + Send>>;

/// An open stored file ready to be streamed back to a client.
pub struct FileDownload {
    pub file: StoredFile,
    pub reader: FileReader,
}

/// Construction parameters for [`LocalFileStore`].
#[derive(Clone, Debug)]
pub struct StorageSettings {
    pub root: PathBuf,
}

impl StorageSettings {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

/// Trait abstraction for uploaded-file storage.
/// Implementations can be a local directory, object storage, or a database.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Persist `payload` under a freshly generated key.
    async fn upload(&self, original_name: &str, payload: &[u8]) -> Result<StoredFile, ServiceError>;
    /// All stored files, most recently created first.
    async fn list(&self) -> Result<Vec<StoredFile>, ServiceError>;
    /// Open a stored file for reading.
    async fn get(&self, storage_key: &str) -> Result<FileDownload, ServiceError>;
    /// Remove a stored file; `FileNotFound` if it is already gone.
    async fn delete(&self, storage_key: &str) -> Result<(), ServiceError>;
}
