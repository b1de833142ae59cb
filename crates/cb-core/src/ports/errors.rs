use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppDirsError {
    #[error("data-local directory is unavailable on this platform")]
    DataLocalDirUnavailable,
}

/// Persistent store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("failed to read `{key}`: {message}")]
    Read { key: String, message: String },

    #[error("failed to write `{key}`: {message}")]
    Write { key: String, message: String },

    #[error("failed to remove `{key}`: {message}")]
    Remove { key: String, message: String },

    /// A batched removal did not confirm every key.
    #[error("batch removal incomplete for [{}]", failed_keys.join(", "))]
    PartialRemoval { failed_keys: Vec<String> },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn read(key: &str, message: impl Into<String>) -> Self {
        Self::Read {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn write(key: &str, message: impl Into<String>) -> Self {
        Self::Write {
            key: key.to_string(),
            message: message.into(),
        }
    }

    pub fn remove(key: &str, message: impl Into<String>) -> Self {
        Self::Remove {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
