use std::path::PathBuf;

use cb_core::{
    app_dirs::AppDirs,
    ports::{AppDirsError, AppDirsPort},
};

pub const APP_DIR_NAME: &str = "coffeebrew";

/// Side-by-side installs pick a separate data root through this variable.
pub const PROFILE_ENV: &str = "COFFEEBREW_PROFILE";

fn resolved_app_dir_name() -> String {
    match std::env::var(PROFILE_ENV) {
        Ok(profile) if !profile.trim().is_empty() => {
            format!("{APP_DIR_NAME}-{}", profile.trim())
        }
        _ => APP_DIR_NAME.to_string(),
    }
}

#[derive(Default)]
pub struct DirsAppDirsAdapter {
    base_data_local_dir_override: Option<PathBuf>,
}

impl DirsAppDirsAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve app dirs under `base` instead of the platform data-local dir.
    pub fn with_base_data_local_dir(base: PathBuf) -> Self {
        Self {
            base_data_local_dir_override: Some(base),
        }
    }

    fn base_data_local_dir(&self) -> Option<PathBuf> {
        match &self.base_data_local_dir_override {
            Some(base) => Some(base.clone()),
            None => dirs::data_local_dir(),
        }
    }
}

impl AppDirsPort for DirsAppDirsAdapter {
    fn get_app_dirs(&self) -> Result<AppDirs, AppDirsError> {
        let base = self
            .base_data_local_dir()
            .ok_or(AppDirsError::DataLocalDirUnavailable)?;

        Ok(AppDirs {
            app_data_root: base.join(resolved_app_dir_name()),
        })
    }
}
