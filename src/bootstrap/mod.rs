pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config, CONFIG_FILE_NAME};
pub use tracing::init_tracing_subscriber;
pub use wiring::{logs_dir, wire_app};
