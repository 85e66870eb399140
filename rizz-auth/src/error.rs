use rizz_api::{ApiError, StatusCode};
use thiserror::Error;

use crate::client::RefreshError;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Token storage error: {0}")]
    TokenStorage(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The credential could not be renewed; the stored pair has been cleared.
    #[error("Credential refresh failed: {0}")]
    Refresh(#[from] RefreshError),
}

impl AuthError {
    /// True when this failure means the user is no longer signed in.
    ///
    /// An abandoned refresh never touched the stored pair, so it doesn't count.
    pub fn is_logged_out(&self) -> bool {
        matches!(self, AuthError::Refresh(e) if *e != RefreshError::Abandoned)
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AuthError::Api(e) => e.status(),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for AuthError {
    fn from(err: config::ConfigError) -> Self {
        AuthError::Configuration(err.to_string())
    }
}
