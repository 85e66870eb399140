mod base_url;
mod client;
mod credentials;
mod error;
mod remote_config;
mod settings;
mod token_storage;

pub use base_url::{SharedBaseUrls, UrlCache};
pub use client::{AuthClient, AuthState, RefreshError};
pub use credentials::{CredentialStore, Credentials, MemoryCredentialStore};
pub use error::AuthError;
pub use remote_config::RemoteOverride;
pub use settings::Settings;
pub use token_storage::FileCredentialStore;
