//! Persistent key-value store port.

use async_trait::async_trait;

use crate::ports::errors::StoreError;

/// Durable string storage keyed by string.
///
/// Implementations may fail transiently; every failure is reported as a
/// [`StoreError`] and never retried by callers in the core.
#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    /// Read a value; `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Remove several keys, best effort.
    ///
    /// Every key is attempted. Any failure is reported as
    /// [`StoreError::PartialRemoval`] listing the keys that were not
    /// confirmed removed.
    async fn remove_many(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut failed_keys = Vec::new();
        for key in keys {
            if self.remove(key).await.is_err() {
                failed_keys.push((*key).to_string());
            }
        }
        if failed_keys.is_empty() {
            Ok(())
        } else {
            Err(StoreError::PartialRemoval { failed_keys })
        }
    }
}

#[cfg(test)]
mockall::mock! {
    pub KeyValueStore {}

    #[async_trait]
    impl KeyValueStorePort for KeyValueStore {
        async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
        async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
        async fn remove(&self, key: &str) -> Result<(), StoreError>;
    }
}
