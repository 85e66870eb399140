mod refresh;

use rizz_api::{ApiError, ApiRequest, RawClient, Request};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

use crate::base_url::SharedBaseUrls;
use crate::credentials::{CredentialStore, Credentials};
use crate::error::AuthError;
pub use refresh::RefreshError;
use refresh::{RefreshGuard, RefreshOutcome, RefreshState, Turn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    LoggedIn,
    LoggedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    First,
    /// Replay after a refresh. A 401 here is final.
    Retried,
}

/// API client that attaches the stored bearer credential and recovers from
/// expiry with one refresh shared by every request that hit the 401.
///
/// Cloning is cheap; clones share the credential store, the base URL cell and
/// the refresh state, so they coordinate on a single refresh.
#[derive(Clone)]
pub struct AuthClient {
    raw: RawClient,
    base_urls: SharedBaseUrls,
    store: Arc<dyn CredentialStore>,
    refresh: Arc<Mutex<RefreshState>>,
    auth_state: Arc<watch::Sender<AuthState>>,
}

impl AuthClient {
    pub fn new(raw: RawClient, base_urls: SharedBaseUrls, store: Arc<dyn CredentialStore>) -> Self {
        let initial = match store.load() {
            Ok(Some(_)) => AuthState::LoggedIn,
            _ => AuthState::LoggedOut,
        };
        let (auth_state, _) = watch::channel(initial);

        Self {
            raw,
            base_urls,
            store,
            refresh: Arc::new(Mutex::new(RefreshState::default())),
            auth_state: Arc::new(auth_state),
        }
    }

    pub fn base_urls(&self) -> &SharedBaseUrls {
        &self.base_urls
    }

    pub fn auth_state(&self) -> AuthState {
        *self.auth_state.borrow()
    }

    /// Watch for sign-in / sign-out transitions, including a failed refresh.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.auth_state.subscribe()
    }

    pub async fn send<R>(&self, request: R) -> Result<R::Response, AuthError>
    where
        R: ApiRequest,
    {
        let token = self.access_token()?;

        match self.execute(&request, token.as_deref(), Attempt::First).await {
            Err(e) if e.is_unauthorized() => {
                tracing::debug!(
                    endpoint = %request.endpoint(),
                    "Access token rejected, refreshing"
                );
                let token = self.refreshed_access_token().await?;
                Ok(self
                    .execute(&request, Some(&token), Attempt::Retried)
                    .await?)
            }
            result => Ok(result?),
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let pair = self
            .raw
            .execute(&Request::auth().login(email, password), &self.base_urls.current(), None)
            .await?;
        self.sign_in(Credentials::try_from(pair)?)
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<(), AuthError> {
        let mut request = Request::auth().register(email, password);
        if let Some(name) = name {
            request = request.name(name);
        }

        let pair = self
            .raw
            .execute(&request, &self.base_urls.current(), None)
            .await?;
        self.sign_in(Credentials::try_from(pair)?)
    }

    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear()?;
        self.auth_state.send_replace(AuthState::LoggedOut);
        tracing::info!("Signed out");
        Ok(())
    }

    fn sign_in(&self, credentials: Credentials) -> Result<(), AuthError> {
        self.store.save(&credentials)?;
        self.auth_state.send_replace(AuthState::LoggedIn);
        tracing::info!("Signed in");
        Ok(())
    }

    fn access_token(&self) -> Result<Option<String>, AuthError> {
        Ok(self
            .store
            .load()?
            .map(|credentials| credentials.access_token().to_string()))
    }

    async fn execute<R>(
        &self,
        request: &R,
        token: Option<&str>,
        attempt: Attempt,
    ) -> Result<R::Response, ApiError>
    where
        R: ApiRequest,
    {
        let result = self
            .raw
            .execute(request, &self.base_urls.current(), token)
            .await;

        if attempt == Attempt::Retried {
            if let Err(e) = &result {
                if e.is_unauthorized() {
                    tracing::warn!(
                        endpoint = %request.endpoint(),
                        "Request rejected again after refresh"
                    );
                }
            }
        }
        result
    }

    /// Join the in-flight refresh, or lead one if none is running.
    ///
    /// A waiter whose leader was cancelled goes around again and either joins
    /// the next refresh or leads it; the stored pair is still intact then.
    async fn refreshed_access_token(&self) -> Result<String, RefreshError> {
        loop {
            let turn = self.refresh.lock().unwrap().join();

            match turn {
                Turn::Wait(rx) => {
                    tracing::debug!("Refresh in flight, queueing request");
                    match rx.await.unwrap_or(Err(RefreshError::Abandoned)) {
                        Err(RefreshError::Abandoned) => {
                            tracing::debug!("Refresh abandoned by its leader, retrying");
                        }
                        outcome => return outcome,
                    }
                }
                Turn::Lead => {
                    let guard = RefreshGuard::new(&self.refresh);
                    let outcome = self.refresh_credentials().await;
                    guard.complete(&outcome);
                    return outcome;
                }
            }
        }
    }

    async fn refresh_credentials(&self) -> RefreshOutcome {
        match self.exchange_refresh_token().await {
            Ok(credentials) => {
                tracing::info!("Access token refreshed");
                Ok(credentials.access_token().to_string())
            }
            Err(e) => {
                tracing::warn!("Token refresh failed, signing out: {}", e);
                if let Err(clear_err) = self.store.clear() {
                    tracing::warn!("Failed to clear credentials: {}", clear_err);
                }
                self.auth_state.send_replace(AuthState::LoggedOut);
                Err(e)
            }
        }
    }

    async fn exchange_refresh_token(&self) -> Result<Credentials, RefreshError> {
        let refresh_token = self
            .store
            .load()
            .map_err(|e| RefreshError::Storage(e.to_string()))?
            .map(|credentials| credentials.refresh_token().to_string())
            .ok_or(RefreshError::MissingRefreshToken)?;

        let pair = self
            .raw
            .execute(
                &Request::auth().refresh(refresh_token),
                &self.base_urls.current(),
                None,
            )
            .await?;

        let credentials = Credentials::try_from(pair)
            .map_err(|e| RefreshError::InvalidResponse(e.to_string()))?;
        self.store
            .save(&credentials)
            .map_err(|e| RefreshError::Storage(e.to_string()))?;

        Ok(credentials)
    }
}
