use rizz_api::endpoints::rizz::{Category, RizzResponse, RizzStats, Tone};
use rizz_api::{BaseUrls, RawClient, Request};
use rizz_auth::{
    AuthClient, AuthError, AuthState, FileCredentialStore, RemoteOverride, Settings,
    SharedBaseUrls, UrlCache,
};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::error::RizzError;
use crate::preferences::{Preferences, UserPreferences};

/// Shortest input the backend will generate replies for.
pub const MIN_INPUT_CHARS: usize = 5;

/// Everything a signed-in (or signing-in) app needs: the authenticated
/// client, the shared base URL and the local preference store.
#[derive(Clone)]
pub struct Session {
    client: AuthClient,
    preferences: Preferences,
}

impl Session {
    /// Wire up stores and clients and kick off the remote base URL override.
    ///
    /// The cached override is applied before this returns. The returned handle
    /// completes once the remote config fetch has finished; callers don't need
    /// to await it.
    ///
    /// The fetch runs as a task on the current tokio runtime.
    pub async fn start(settings: &Settings) -> Result<(Self, JoinHandle<()>), RizzError> {
        settings.validate().map_err(AuthError::Configuration)?;

        let data_dir = settings.data_dir()?;
        let store = FileCredentialStore::at(data_dir.join("credentials.json"))?;
        let cache = UrlCache::at(data_dir.join("base_url.json"));

        let base_urls = SharedBaseUrls::new(
            BaseUrls::from_raw(&settings.server_url).map_err(AuthError::from)?,
        );
        let raw = RawClient::new(settings.app_id.clone(), settings.request_timeout())
            .map_err(AuthError::from)?;

        let remote = RemoteOverride::new(raw.clone(), base_urls.clone(), cache);
        remote.restore_cached();
        let override_task = remote.spawn();

        let client = AuthClient::new(raw, base_urls, Arc::new(store));
        tracing::info!(
            public = client.base_urls().current().public(),
            signed_in = client.auth_state() == AuthState::LoggedIn,
            "Session started"
        );

        let session = Self {
            client,
            preferences: Preferences::new(data_dir.join("preferences.json")),
        };
        Ok((session, override_task))
    }

    pub fn client(&self) -> &AuthClient {
        &self.client
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Current toggles, defaults when nothing was saved yet.
    pub async fn user_preferences(&self) -> Result<UserPreferences, RizzError> {
        Ok(self.preferences.load().await?)
    }

    pub async fn complete_onboarding(&self) -> Result<(), RizzError> {
        self.preferences.set_onboarding_complete(true).await?;
        tracing::info!("Onboarding complete");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.auth_state() == AuthState::LoggedIn
    }

    pub fn auth_state(&self) -> watch::Receiver<AuthState> {
        self.client.subscribe()
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), RizzError> {
        self.client.login(email, password).await?;
        Ok(())
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<(), RizzError> {
        self.client.register(email, password, name).await?;
        Ok(())
    }

    pub fn logout(&self) -> Result<(), RizzError> {
        self.client.logout()?;
        Ok(())
    }

    pub async fn generate(
        &self,
        input_text: &str,
        tone: Tone,
        category: Category,
    ) -> Result<RizzResponse, RizzError> {
        let actual = input_text.chars().count();
        if actual < MIN_INPUT_CHARS {
            return Err(RizzError::InputTooShort {
                min: MIN_INPUT_CHARS,
                actual,
            });
        }

        tracing::debug!(%tone, %category, input_len = actual, "Generating replies");
        let request = Request::rizz()
            .generate(input_text)
            .tone(tone)
            .category(category);

        match self.client.send(request).await {
            Ok(response) => {
                tracing::info!(
                    responses = response.data.responses().len(),
                    "Generated replies"
                );
                Ok(response.data)
            }
            Err(AuthError::Api(e)) if e.is_limit_reached() => {
                tracing::info!("Daily generation limit reached");
                Err(RizzError::LimitReached)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn stats(&self) -> Result<RizzStats, RizzError> {
        Ok(self.client.send(Request::rizz().stats()).await?)
    }

    /// Record the picked suggestion in the background. `index` is 1-based.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn select(&self, response_id: &str, index: u8) -> JoinHandle<()> {
        let client = self.client.clone();
        let request = Request::rizz().select(response_id, index);
        tokio::spawn(async move {
            if let Err(e) = client.send(request).await {
                tracing::debug!("Failed to record selected response: {}", e);
            }
        })
    }
}
