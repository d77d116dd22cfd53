use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
/// Errors raised while setting up the native client.
pub enum ClientError {
    /// Configuration is invalid.
    #[error("invalid settings: {0}")]
    Settings(#[from] SettingsError),

    /// The HTTP client could not be built (TLS backend, resolver).
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result of `alalfy-client` setup operations.
pub type ClientResult<T> = Result<T, ClientError>;
