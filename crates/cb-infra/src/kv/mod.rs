mod file_store;

pub use file_store::{FileKeyValueStore, DEFAULT_STORE_DIR};
