pub mod auth;
pub mod fs;
pub mod kv;
pub mod time;

pub use auth::LocalCredentialProvider;
pub use fs::DirsAppDirsAdapter;
pub use kv::FileKeyValueStore;
pub use time::SystemClock;
