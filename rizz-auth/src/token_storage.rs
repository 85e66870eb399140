use crate::credentials::{CredentialStore, Credentials, StoredCredentials};
use crate::error::AuthError;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed credential store.
///
/// The pair lives in one JSON record that is replaced with a rename, so a
/// reader never observes one token from the old pair and one from the new.
pub struct FileCredentialStore {
    token_path: PathBuf,
}

impl FileCredentialStore {
    pub fn new() -> Result<Self, AuthError> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| AuthError::Configuration("Could not find cache directory".to_string()))?
            .join("rizz");
        Self::at(cache_dir.join("credentials.json"))
    }

    pub fn at(token_path: impl Into<PathBuf>) -> Result<Self, AuthError> {
        let token_path = token_path.into();

        if let Some(dir) = token_path.parent() {
            if !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to create cache directory: {}", e))
                })?;
            }
        }

        Ok(Self { token_path })
    }

    pub fn path(&self) -> &Path {
        &self.token_path
    }

    fn temp_path(&self) -> PathBuf {
        self.token_path.with_extension("json.tmp")
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credentials>, AuthError> {
        if !self.token_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.token_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to read token: {}", e)))?;

        let stored: StoredCredentials = serde_json::from_str(&json)?;
        Ok(stored.into_credentials())
    }

    fn save(&self, credentials: &Credentials) -> Result<(), AuthError> {
        let json = serde_json::to_string_pretty(&StoredCredentials::from(credentials))?;
        let temp_path = self.temp_path();

        fs::write(&temp_path, json)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;

        // Set permissions to 0600 (read/write for owner only)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&temp_path)
                .map_err(|e| {
                    AuthError::TokenStorage(format!("Failed to get file permissions: {}", e))
                })?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp_path, perms).map_err(|e| {
                AuthError::TokenStorage(format!("Failed to set file permissions: {}", e))
            })?;
        }

        fs::rename(&temp_path, &self.token_path)
            .map_err(|e| AuthError::TokenStorage(format!("Failed to save token: {}", e)))?;

        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        if self.token_path.exists() {
            fs::remove_file(&self.token_path)
                .map_err(|e| AuthError::TokenStorage(format!("Failed to delete token: {}", e)))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, FileCredentialStore) {
        let dir = tempfile::tempdir().unwrap();
        let store =
            FileCredentialStore::at(dir.path().join("rizz").join("credentials.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_missing_file_is_none() {
        let (_dir, store) = store();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load_clear() {
        let (_dir, store) = store();
        let credentials = Credentials::new("A1", "R1").unwrap();

        store.save(&credentials).unwrap();
        assert_eq!(store.load().unwrap(), Some(credentials));
        assert!(!store.temp_path().exists());

        store.save(&Credentials::new("A2", "R2").unwrap()).unwrap();
        assert_eq!(store.load().unwrap(), Credentials::new("A2", "R2"));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        assert!(!store.path().exists());

        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_partial_record_is_none() {
        let (_dir, store) = store();
        fs::write(store.path(), r#"{ "access_token": "A1" }"#).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_owner_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = store();
        store.save(&Credentials::new("A1", "R1").unwrap()).unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
