//! # Configuration Loader
//!
//! Reads TOML into [`AppConfig`] and decides where data lives. Value mapping
//! and defaults belong to `cb_core::config`.

use std::path::PathBuf;

use anyhow::Context;
use cb_core::ports::AppDirsPort;
use cb_core::AppConfig;

pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read, is not valid TOML, or holds a
/// timing value that is not a non-negative integer.
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
        .with_context(|| format!("Invalid config file: {}", config_path.display()))
}

/// Resolve the effective configuration.
///
/// An explicit `config_path` must exist. Otherwise `config.toml` inside the
/// data root is read when present. The data root is `data_dir` when given,
/// then `[storage] data_dir` from the file, then the platform app directory.
pub fn resolve_config(
    config_path: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    app_dirs: &dyn AppDirsPort,
) -> anyhow::Result<AppConfig> {
    let mut config = match (config_path, &data_dir) {
        (Some(path), _) => load_config(path)?,
        (None, Some(dir)) => load_if_present(dir.join(CONFIG_FILE_NAME))?,
        (None, None) => {
            let root = platform_root(app_dirs)?;
            let mut config = load_if_present(root.join(CONFIG_FILE_NAME))?;
            if config.data_dir.as_os_str().is_empty() {
                config.data_dir = root;
            }
            config
        }
    };

    if let Some(dir) = data_dir {
        config.data_dir = dir;
    } else if config.data_dir.as_os_str().is_empty() {
        config.data_dir = platform_root(app_dirs)?;
    }

    Ok(config)
}

fn load_if_present(path: PathBuf) -> anyhow::Result<AppConfig> {
    if path.is_file() {
        load_config(path)
    } else {
        Ok(AppConfig::empty())
    }
}

fn platform_root(app_dirs: &dyn AppDirsPort) -> anyhow::Result<PathBuf> {
    Ok(app_dirs
        .get_app_dirs()
        .context("Failed to resolve app data directory")?
        .app_data_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cb_core::app_dirs::AppDirs;
    use cb_core::config::DEFAULT_SPLASH_DURATION_MS;
    use cb_core::ports::AppDirsError;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    struct FixedAppDirs(PathBuf);

    impl AppDirsPort for FixedAppDirs {
        fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
            Ok(AppDirs {
                app_data_root: self.0.clone(),
            })
        }
    }

    struct NoAppDirs;

    impl AppDirsPort for NoAppDirs {
        fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
            Err(AppDirsError::DataLocalDirUnavailable)
        }
    }

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_config(
            r#"
            [storage]
            data_dir = "/path/to/data"

            [splash]
            duration_ms = 1200

            [auth]
            simulated_latency_ms = 1500
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/path/to/data"));
        assert_eq!(config.splash_duration_ms, 1200);
        assert_eq!(config.auth_latency_ms, 1500);
    }

    #[test]
    fn test_load_config_uses_defaults_when_missing() {
        let temp_file = write_config("[storage]\n");

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config, AppConfig::empty());
        assert_eq!(config.splash_duration_ms, DEFAULT_SPLASH_DURATION_MS);
    }

    #[test]
    fn test_load_config_rejects_negative_timings() {
        let temp_file = write_config("[splash]\nduration_ms = -5\n");

        assert!(load_config(temp_file.path().to_path_buf()).is_err());
    }

    #[test]
    fn test_load_config_returns_error_on_file_not_found() {
        let result = load_config(PathBuf::from("/nonexistent/coffeebrew/config.toml"));

        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_returns_error_on_invalid_toml() {
        let temp_file = write_config("[storage\n");

        assert!(load_config(temp_file.path().to_path_buf()).is_err());
    }

    #[test]
    fn resolve_without_file_uses_platform_root() {
        let temp_dir = TempDir::new().unwrap();
        let app_dirs = FixedAppDirs(temp_dir.path().to_path_buf());

        let config = resolve_config(None, None, &app_dirs).unwrap();

        assert_eq!(config.data_dir, temp_dir.path());
        assert_eq!(config.splash_duration_ms, DEFAULT_SPLASH_DURATION_MS);
    }

    #[test]
    fn resolve_reads_config_inside_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "[splash]\nduration_ms = 0\n",
        )
        .unwrap();

        let config =
            resolve_config(None, Some(temp_dir.path().to_path_buf()), &NoAppDirs).unwrap();

        assert_eq!(config.data_dir, temp_dir.path());
        assert_eq!(config.splash_duration_ms, 0);
    }

    #[test]
    fn resolve_prefers_configured_data_dir_over_platform_root() {
        let temp_dir = TempDir::new().unwrap();
        let temp_file = write_config("[storage]\ndata_dir = \"/srv/coffeebrew\"\n");
        let app_dirs = FixedAppDirs(temp_dir.path().to_path_buf());

        let config =
            resolve_config(Some(temp_file.path().to_path_buf()), None, &app_dirs).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/coffeebrew"));
    }

    #[test]
    fn configured_data_dir_needs_no_platform_root() {
        let temp_file = write_config("[storage]\ndata_dir = \"/srv/coffeebrew\"\n");

        let config =
            resolve_config(Some(temp_file.path().to_path_buf()), None, &NoAppDirs).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/coffeebrew"));
    }

    #[test]
    fn explicit_config_without_data_dir_falls_back_to_platform_root() {
        let temp_dir = TempDir::new().unwrap();
        let temp_file = write_config("[splash]\nduration_ms = 10\n");
        let app_dirs = FixedAppDirs(temp_dir.path().to_path_buf());

        let config =
            resolve_config(Some(temp_file.path().to_path_buf()), None, &app_dirs).unwrap();

        assert_eq!(config.data_dir, temp_dir.path());
        assert_eq!(config.splash_duration_ms, 10);
    }

    #[test]
    fn resolve_fails_without_any_data_root() {
        assert!(resolve_config(None, None, &NoAppDirs).is_err());
    }

    #[test]
    fn resolve_requires_explicit_config_to_exist() {
        let temp_dir = TempDir::new().unwrap();

        let result = resolve_config(
            Some(temp_dir.path().join("missing.toml")),
            Some(temp_dir.path().to_path_buf()),
            &NoAppDirs,
        );

        assert!(result.is_err());
    }
}
