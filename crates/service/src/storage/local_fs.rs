use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::{debug, info, warn};

use super::key::{generate_storage_key, is_valid_storage_key, original_name_of, sanitize_original_name};
use super::{FileDownload, FileStore, StorageSettings, StoredFile};
use crate::errors::ServiceError;

/// Directory-backed [`FileStore`]. Each upload becomes one file named by its
/// storage key; there is no index beside the directory itself.
#[derive(Clone, Debug)]
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(settings: StorageSettings) -> Self {
        Self { root: settings.root }
    }

    /// Build the store and create its directory once, up front.
    pub async fn init(settings: StorageSettings) -> Result<Arc<Self>, ServiceError> {
        let store = Self::new(settings);
        fs::create_dir_all(&store.root).await?;
        info!(root = %store.root.display(), "local file store ready");
        Ok(Arc::new(store))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_path(&self, storage_key: &str) -> Result<PathBuf, ServiceError> {
        if !is_valid_storage_key(storage_key) {
            return Err(ServiceError::file_not_found(storage_key));
        }
        Ok(self.root.join(storage_key))
    }

    fn describe(storage_key: &str, meta: &std::fs::Metadata) -> StoredFile {
        StoredFile {
            storage_key: storage_key.to_string(),
            original_name: original_name_of(storage_key).to_string(),
            size_bytes: meta.len(),
            created_at: created_at(meta),
        }
    }
}

/// Birth time where the filesystem reports it, otherwise last modification.
fn created_at(meta: &std::fs::Metadata) -> DateTime<Utc> {
    meta.created()
        .or_else(|_| meta.modified())
        .map(DateTime::<Utc>::from)
        .unwrap_or_else(|_| Utc::now())
}

fn not_found_or_io(storage_key: &str, e: io::Error) -> ServiceError {
    if e.kind() == io::ErrorKind::NotFound {
        ServiceError::file_not_found(storage_key)
    } else {
        ServiceError::Io(e)
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn upload(&self, original_name: &str, payload: &[u8]) -> Result<StoredFile, ServiceError> {
        let name = sanitize_original_name(original_name);
        let storage_key = generate_storage_key(&name);
        let path = self.root.join(&storage_key);

        fs::create_dir_all(&self.root).await?;
        if let Err(e) = fs::write(&path, payload).await {
            // 写入失败时删除半截文件，避免残留
            let _ = fs::remove_file(&path).await;
            return Err(e.into());
        }

        let meta = fs::metadata(&path).await?;
        let file = Self::describe(&storage_key, &meta);
        info!(storage_key = %file.storage_key, size = file.size_bytes, "file stored");
        Ok(file)
    }

    async fn list(&self) -> Result<Vec<StoredFile>, ServiceError> {
        let mut dir = match fs::read_dir(&self.root).await {
            Ok(dir) => dir,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut files = Vec::new();
        while let Some(entry) = dir.next_entry().await? {
            let Ok(storage_key) = entry.file_name().into_string() else {
                warn!(path = %entry.path().display(), "skipping entry with non UTF-8 name");
                continue;
            };
            // fs::metadata 会跟随符号链接，DirEntry::metadata 不会
            let meta = match fs::metadata(entry.path()).await {
                Ok(meta) => meta,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(%storage_key, "entry vanished during listing");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if !meta.is_file() {
                continue;
            }
            files.push(Self::describe(&storage_key, &meta));
        }

        files.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.storage_key.cmp(&a.storage_key))
        });
        Ok(files)
    }

    async fn get(&self, storage_key: &str) -> Result<FileDownload, ServiceError> {
        let path = self.entry_path(storage_key)?;
        let handle = fs::File::open(&path)
            .await
            .map_err(|e| not_found_or_io(storage_key, e))?;
        let meta = handle.metadata().await?;
        if !meta.is_file() {
            return Err(ServiceError::file_not_found(storage_key));
        }
        Ok(FileDownload {
            file: Self::describe(storage_key, &meta),
            reader: Box::pin(handle),
        })
    }

    async fn delete(&self, storage_key: &str) -> Result<(), ServiceError> {
        let path = self.entry_path(storage_key)?;
        let meta = fs::symlink_metadata(&path)
            .await
            .map_err(|e| not_found_or_io(storage_key, e))?;
        if meta.is_dir() {
            // 目录不属于存储文件，按不存在处理
            return Err(ServiceError::file_not_found(storage_key));
        }
        fs::remove_file(&path)
            .await
            .map_err(|e| not_found_or_io(storage_key, e))?;
        info!(%storage_key, "file deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::AsyncReadExt;
    use uuid::Uuid;

    fn temp_root() -> PathBuf {
        std::env::temp_dir().join(format!("svc_file_store_{}", Uuid::new_v4()))
    }

    async fn read_all(download: FileDownload) -> Vec<u8> {
        let mut reader = download.reader;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf).await.unwrap();
        buf
    }

    #[tokio::test]
    async fn upload_list_download_delete_roundtrip() -> Result<(), anyhow::Error> {
        let root = temp_root();
        let store = LocalFileStore::init(StorageSettings::new(&root)).await?;

        // initially empty
        assert!(store.list().await?.is_empty());

        let stored = store.upload("report.txt", b"hello").await?;
        assert_eq!(stored.original_name, "report.txt");
        assert_eq!(stored.size_bytes, 5);
        assert_eq!(stored.size_formatted(), "5 Bytes");
        assert!(stored.storage_key.ends_with("-report.txt"));

        let listed = store.list().await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], stored);

        let download = store.get(&stored.storage_key).await?;
        assert_eq!(download.file.original_name, "report.txt");
        assert_eq!(read_all(download).await, b"hello");

        store.delete(&stored.storage_key).await?;
        assert!(store.list().await?.is_empty());

        // second delete reports the missing key
        let err = store.delete(&stored.storage_key).await.unwrap_err();
        assert!(matches!(err, ServiceError::FileNotFound(k) if k == stored.storage_key));

        let _ = fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn list_is_newest_first() -> Result<(), anyhow::Error> {
        let root = temp_root();
        let store = LocalFileStore::init(StorageSettings::new(&root)).await?;

        let first = store.upload("first.txt", b"1").await?;
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = store.upload("second.txt", b"22").await?;

        let listed = store.list().await?;
        let keys: Vec<_> = listed.iter().map(|f| f.storage_key.as_str()).collect();
        assert_eq!(keys, vec![second.storage_key.as_str(), first.storage_key.as_str()]);

        let _ = fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_directory_lists_empty_and_upload_recreates_it() -> Result<(), anyhow::Error> {
        let root = temp_root();
        let store = LocalFileStore::new(StorageSettings::new(&root));
        assert!(store.list().await?.is_empty());

        let stored = store.upload("a.bin", &[0u8; 2048]).await?;
        assert_eq!(stored.size_formatted(), "2 KB");
        assert_eq!(store.list().await?.len(), 1);

        let _ = fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn unknown_or_malformed_keys_are_not_found() -> Result<(), anyhow::Error> {
        let root = temp_root();
        let store = LocalFileStore::init(StorageSettings::new(&root)).await?;

        for key in ["1700000000000000000000-nope.txt", "../etc/passwd", ".."] {
            assert!(matches!(store.get(key).await, Err(ServiceError::FileNotFound(_))), "{key}");
            assert!(matches!(store.delete(key).await, Err(ServiceError::FileNotFound(_))), "{key}");
        }

        let _ = fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn path_components_in_names_stay_inside_root() -> Result<(), anyhow::Error> {
        let root = temp_root();
        let store = LocalFileStore::init(StorageSettings::new(&root)).await?;

        let stored = store.upload("../../escape.txt", b"x").await?;
        assert_eq!(stored.original_name, "escape.txt");
        assert!(fs::metadata(root.join(&stored.storage_key)).await?.is_file());

        let _ = fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn listing_skips_subdirectories_and_keeps_foreign_files() -> Result<(), anyhow::Error> {
        let root = temp_root();
        let store = LocalFileStore::init(StorageSettings::new(&root)).await?;
        fs::create_dir_all(root.join("nested")).await?;
        fs::write(root.join("README"), b"manual").await?;

        let listed = store.list().await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].storage_key, "README");
        assert_eq!(listed[0].original_name, "README");

        // a directory is neither downloadable nor deletable
        assert!(matches!(store.get("nested").await, Err(ServiceError::FileNotFound(_))));
        assert!(matches!(store.delete("nested").await, Err(ServiceError::FileNotFound(_))));
        assert!(fs::metadata(root.join("nested")).await?.is_dir());

        let _ = fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn works_through_trait_object() -> Result<(), anyhow::Error> {
        let root = temp_root();
        let store: Arc<dyn FileStore> = LocalFileStore::init(StorageSettings::new(&root)).await?;
        let stored = store.upload("empty.txt", b"").await?;
        assert_eq!(stored.size_bytes, 0);
        assert_eq!(stored.size_formatted(), "0 Bytes");
        assert!(read_all(store.get(&stored.storage_key).await?).await.is_empty());

        let _ = fs::remove_dir_all(&root).await;
        Ok(())
    }
}
