//! Credential handling for external service clients.

mod credentials;

pub use credentials::{SecretString, ServiceCredentials, DEFAULT_REQUEST_TIMEOUT};
