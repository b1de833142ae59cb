//! # Configuration DTO
//!
//! Plain configuration data mapped from TOML. Loading from disk happens in
//! the shell's bootstrap; this module only maps values.

use std::path::PathBuf;

/// Splash sequence (3200 ms) plus its fade-out (400 ms).
pub const DEFAULT_SPLASH_DURATION_MS: u64 = 3600;

/// Application configuration DTO.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Root directory for persisted state and logs. Empty means "use the
    /// platform data directory".
    pub data_dir: PathBuf,

    /// How long the splash phase stays up at minimum.
    pub splash_duration_ms: u64,

    /// Artificial latency of the local credential provider.
    pub auth_latency_ms: u64,
}

impl AppConfig {
    /// Create AppConfig from TOML value.
    ///
    /// Missing keys fall back to the values of [`AppConfig::empty`].
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let defaults = Self::empty();
        Ok(Self {
            data_dir: toml_value
                .get("storage")
                .and_then(|s| s.get("data_dir"))
                .and_then(|v| v.as_str())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            splash_duration_ms: read_millis(toml_value, "splash", "duration_ms")?
                .unwrap_or(defaults.splash_duration_ms),
            auth_latency_ms: read_millis(toml_value, "auth", "simulated_latency_ms")?
                .unwrap_or(defaults.auth_latency_ms),
        })
    }

    /// Configuration with no data directory and default timings.
    pub fn empty() -> Self {
        Self {
            data_dir: PathBuf::new(),
            splash_duration_ms: DEFAULT_SPLASH_DURATION_MS,
            auth_latency_ms: 0,
        }
    }

    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            ..Self::empty()
        }
    }
}

fn read_millis(value: &toml::Value, section: &str, key: &str) -> anyhow::Result<Option<u64>> {
    match value.get(section).and_then(|s| s.get(key)) {
        None => Ok(None),
        Some(raw) => {
            let millis = raw
                .as_integer()
                .ok_or_else(|| anyhow::anyhow!("[{section}] {key} must be an integer"))?;
            let millis = u64::try_from(millis)
                .map_err(|_| anyhow::anyhow!("[{section}] {key} must not be negative"))?;
            Ok(Some(millis))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_toml_reads_all_sections() {
        let value: toml::Value = toml::from_str(
            r#"
            [storage]
            data_dir = "/tmp/coffeebrew"

            [splash]
            duration_ms = 1200

            [auth]
            simulated_latency_ms = 1500
            "#,
        )
        .unwrap();

        let config = AppConfig::from_toml(&value).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/coffeebrew"));
        assert_eq!(config.splash_duration_ms, 1200);
        assert_eq!(config.auth_latency_ms, 1500);
    }

    #[test]
    fn missing_sections_use_empty_values() {
        let value: toml::Value = toml::from_str("").unwrap();
        let config = AppConfig::from_toml(&value).unwrap();
        assert_eq!(config, AppConfig::empty());
        assert_eq!(config.splash_duration_ms, DEFAULT_SPLASH_DURATION_MS);
    }

    #[test]
    fn negative_durations_are_rejected() {
        let value: toml::Value = toml::from_str("[splash]\nduration_ms = -5").unwrap();
        assert!(AppConfig::from_toml(&value).is_err());
    }
}
