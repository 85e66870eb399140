use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs;

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Device-local user toggles. Missing keys take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserPreferences {
    pub haptic_enabled: bool,
    pub biometric_enabled: bool,
    pub notifications_enabled: bool,
    pub onboarding_complete: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            haptic_enabled: true,
            biometric_enabled: false,
            notifications_enabled: true,
            onboarding_complete: false,
        }
    }
}

/// Async preferences store using tokio::fs, one JSON file.
#[derive(Debug, Clone)]
pub struct Preferences {
    path: PathBuf,
}

impl Preferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<UserPreferences, PreferencesError> {
        if !self.path.exists() {
            return Ok(UserPreferences::default());
        }

        let data = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&data)?)
    }

    pub async fn save(&self, preferences: &UserPreferences) -> Result<(), PreferencesError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).await?;
        }

        let json = serde_json::to_string_pretty(preferences)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn update<F>(&self, update_fn: F) -> Result<UserPreferences, PreferencesError>
    where
        F: FnOnce(&mut UserPreferences),
    {
        let mut preferences = self.load().await?;
        update_fn(&mut preferences);
        self.save(&preferences).await?;
        Ok(preferences)
    }

    pub async fn set_haptic_enabled(&self, enabled: bool) -> Result<(), PreferencesError> {
        self.update(|p| p.haptic_enabled = enabled).await.map(|_| ())
    }

    pub async fn set_biometric_enabled(&self, enabled: bool) -> Result<(), PreferencesError> {
        self.update(|p| p.biometric_enabled = enabled).await.map(|_| ())
    }

    pub async fn set_notifications_enabled(&self, enabled: bool) -> Result<(), PreferencesError> {
        self.update(|p| p.notifications_enabled = enabled)
            .await
            .map(|_| ())
    }

    pub async fn set_onboarding_complete(&self, complete: bool) -> Result<(), PreferencesError> {
        self.update(|p| p.onboarding_complete = complete)
            .await
            .map(|_| ())
    }
}
