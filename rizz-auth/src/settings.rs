use config::{Config, ConfigError, File};
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::AuthError;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Bootstrap server URL, used until a cached or remote override replaces it.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    #[serde(default = "default_app_id")]
    pub app_id: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Where credentials, the URL cache and preferences live.
    /// Defaults to `<cache dir>/rizz`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

fn default_server_url() -> String {
    "http://89.47.113.196:8099/api".to_string()
}

fn default_app_id() -> String {
    "rizzcheck".to_string()
}

fn default_request_timeout_secs() -> u64 {
    15
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            app_id: default_app_id(),
            request_timeout_secs: default_request_timeout_secs(),
            data_dir: None,
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config_path =
            std::env::var("RIZZ_CONFIG").unwrap_or_else(|_| "config.toml".to_string());

        let settings = Config::builder()
            .add_source(File::with_name(&config_path).required(false))
            .add_source(config::Environment::with_prefix("RIZZ").separator("__"))
            .build()?;

        settings.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.server_url.is_empty() {
            return Err("server_url is required".to_string());
        }
        if !self.server_url.starts_with("http") {
            return Err("server_url must be a valid HTTP(S) URL".to_string());
        }
        if self.app_id.is_empty() {
            return Err("app_id is required".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be greater than zero".to_string());
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn data_dir(&self) -> Result<PathBuf, AuthError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(dirs::cache_dir()
                .ok_or_else(|| {
                    AuthError::Configuration("Could not find cache directory".to_string())
                })?
                .join("rizz")),
        }
    }
}
