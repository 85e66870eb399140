use rizz_api::endpoints::auth::TokenPair;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::error::AuthError;

/// A complete access/refresh token pair.
///
/// There is no way to build one with a token missing: storage backends hand
/// their raw fields to [`Credentials::from_parts`], which treats a partial pair
/// as no credentials at all.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_token: String,
    refresh_token: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Option<Self> {
        Self::from_parts(Some(access_token.into()), Some(refresh_token.into()))
    }

    pub fn from_parts(access_token: Option<String>, refresh_token: Option<String>) -> Option<Self> {
        let access_token = access_token.filter(|t| !t.is_empty());
        let refresh_token = refresh_token.filter(|t| !t.is_empty());

        match (access_token, refresh_token) {
            (Some(access_token), Some(refresh_token)) => Some(Self {
                access_token,
                refresh_token,
            }),
            (None, None) => None,
            (access, _) => {
                tracing::warn!(
                    has_access_token = access.is_some(),
                    "Ignoring partial credential pair"
                );
                None
            }
        }
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .finish()
    }
}

impl TryFrom<TokenPair> for Credentials {
    type Error = AuthError;

    fn try_from(pair: TokenPair) -> Result<Self, Self::Error> {
        Credentials::new(pair.access_token, pair.refresh_token)
            .ok_or_else(|| AuthError::TokenStorage("Server returned an empty token".to_string()))
    }
}

/// On-disk shape. Both fields are optional so a damaged record still parses
/// and goes through the partial-pair check.
#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct StoredCredentials {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl StoredCredentials {
    pub fn into_credentials(self) -> Option<Credentials> {
        Credentials::from_parts(self.access_token, self.refresh_token)
    }
}

impl From<&Credentials> for StoredCredentials {
    fn from(credentials: &Credentials) -> Self {
        Self {
            access_token: Some(credentials.access_token.clone()),
            refresh_token: Some(credentials.refresh_token.clone()),
        }
    }
}

/// Secure, device-local storage for the credential pair.
///
/// `save` and `clear` act on both tokens together.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credentials>, AuthError>;

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError>;

    fn clear(&self) -> Result<(), AuthError>;
}

/// Process-local store, used by tests and hosts that keep secrets elsewhere.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    parts: Mutex<(Option<String>, Option<String>)>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credentials(credentials: &Credentials) -> Self {
        Self::from_parts(
            Some(credentials.access_token().to_string()),
            Some(credentials.refresh_token().to_string()),
        )
    }

    /// Seeds raw fields, bypassing the pair check, to model a damaged keychain.
    pub fn from_parts(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            parts: Mutex::new((access_token, refresh_token)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, AuthError> {
        let (access, refresh) = self.parts.lock().unwrap().clone();
        Ok(Credentials::from_parts(access, refresh))
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        *self.parts.lock().unwrap() = (
            Some(credentials.access_token.clone()),
            Some(credentials.refresh_token.clone()),
        );
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.parts.lock().unwrap() = (None, None);
        Ok(())
    }
}
