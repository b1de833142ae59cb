mod local_provider;

pub use local_provider::{LocalCredentialProvider, GUEST_TOKEN};
