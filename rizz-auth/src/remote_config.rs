use rizz_api::{BaseUrls, RawClient, Request};
use tokio::task::JoinHandle;

use crate::base_url::{SharedBaseUrls, UrlCache};
use crate::error::AuthError;

/// Startup-only override of the API base URL from the server's remote config.
///
/// Nothing here ever fails the caller: a bad cache entry or an unreachable
/// config endpoint leaves the active base where it was.
pub struct RemoteOverride {
    raw: RawClient,
    base_urls: SharedBaseUrls,
    cache: UrlCache,
}

impl RemoteOverride {
    pub fn new(raw: RawClient, base_urls: SharedBaseUrls, cache: UrlCache) -> Self {
        Self {
            raw,
            base_urls,
            cache,
        }
    }

    /// Apply the last cached override, if there is a usable one.
    pub fn restore_cached(&self) -> Option<BaseUrls> {
        let cached = match self.cache.load() {
            Ok(Some(url)) => url,
            Ok(None) => return None,
            Err(e) => {
                tracing::debug!("Ignoring unreadable base URL cache: {}", e);
                return None;
            }
        };

        match self.base_urls.apply(&cached) {
            Ok(urls) => {
                tracing::debug!(public = urls.public(), "Restored cached API base URL");
                Some(urls)
            }
            Err(e) => {
                tracing::debug!("Ignoring cached base URL: {}", e);
                None
            }
        }
    }

    /// Fetch the remote config and apply its `api_base_url`.
    ///
    /// Returns `Ok(None)` when the document carries no override.
    pub async fn fetch(&self) -> Result<Option<BaseUrls>, AuthError> {
        let config = self
            .raw
            .execute(&Request::config().get(), &self.base_urls.current(), None)
            .await?;

        let Some(remote_url) = config.api_base_url.filter(|url| !url.trim().is_empty()) else {
            return Ok(None);
        };

        let urls = self.base_urls.apply(&remote_url)?;
        self.cache.store(&remote_url)?;
        tracing::info!(public = urls.public(), "API base URL overridden by remote config");
        Ok(Some(urls))
    }

    /// Fire-and-forget wrapper around [`fetch`](Self::fetch); errors are swallowed.
    pub async fn run(self) {
        if let Err(e) = self.fetch().await {
            tracing::debug!("Remote config fetch skipped: {}", e);
        }
    }

    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
