mod app_data_dir;

pub use app_data_dir::{DirsAppDirsAdapter, APP_DIR_NAME, PROFILE_ENV};
