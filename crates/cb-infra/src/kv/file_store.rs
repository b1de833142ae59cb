//! File-based key-value store
//!
//! One file per key under a base directory. Writes go to a temp file that is
//! synced and renamed over the target, so a reader sees either the old or
//! the new value, never a torn one.

use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use cb_core::ports::{KeyValueStorePort, StoreError};

pub const DEFAULT_STORE_DIR: &str = "store";

const VALUE_EXTENSION: &str = "value";

pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Create store with a concrete base directory
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Create store at `<app_data_root>/store`
    pub fn with_defaults(app_data_root: PathBuf) -> Self {
        Self {
            base_dir: app_data_root.join(DEFAULT_STORE_DIR),
        }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    fn file_path(&self, key: &str) -> Result<PathBuf, String> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(format!("invalid key `{key}`"));
        }
        Ok(self.base_dir.join(format!("{key}.{VALUE_EXTENSION}")))
    }

    async fn write_atomically(&self, path: &PathBuf, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.base_dir).await?;

        let temp_path = path.with_extension("tmp");
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(value.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, path).await
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.file_path(key).map_err(|e| StoreError::read(key, e))?;
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StoreError::read(key, err.to_string())),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.file_path(key).map_err(|e| StoreError::write(key, e))?;
        self.write_atomically(&path, value)
            .await
            .map_err(|e| StoreError::write(key, e.to_string()))?;
        debug!(key, bytes = value.len(), "store value written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.file_path(key).map_err(|e| StoreError::remove(key, e))?;
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(key, "store value removed");
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::remove(key, err.to_string())),
        }
    }
}
