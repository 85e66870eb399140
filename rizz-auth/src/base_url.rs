use rizz_api::{ApiError, BaseUrls};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use crate::error::AuthError;

/// Base URL cell shared by every client of a session.
///
/// Readers take a snapshot per request; an override only affects requests
/// that start after it was applied.
#[derive(Debug, Clone)]
pub struct SharedBaseUrls {
    inner: Arc<RwLock<BaseUrls>>,
}

impl SharedBaseUrls {
    pub fn new(initial: BaseUrls) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn current(&self) -> BaseUrls {
        self.inner.read().unwrap().clone()
    }

    /// Parse `raw` and make it the active base. On error the active base is untouched.
    pub fn apply(&self, raw: &str) -> Result<BaseUrls, ApiError> {
        let urls = BaseUrls::from_raw(raw)?;
        *self.inner.write().unwrap() = urls.clone();
        tracing::debug!(public = urls.public(), "API base URL applied");
        Ok(urls)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct CachedBaseUrl {
    api_base_url: String,
}

/// Last-known-good override URL, kept across restarts.
#[derive(Debug, Clone)]
pub struct UrlCache {
    path: PathBuf,
}

impl UrlCache {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("rizz");
        Ok(Self::at(cache_dir.join("base_url.json")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<String>, AuthError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.path)?;
        let cached: CachedBaseUrl = serde_json::from_str(&json)?;
        Ok(Some(cached.api_base_url).filter(|url| !url.is_empty()))
    }

    pub fn store(&self, url: &str) -> Result<(), AuthError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let json = serde_json::to_string_pretty(&CachedBaseUrl {
            api_base_url: url.to_string(),
        })?;
        let temp_path = self.temp_path();
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}
