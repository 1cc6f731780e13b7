use crate::errors::CredentialError;
use keyring::Entry;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

/// Credentials persisted between sessions: the OAuth access token plus the
/// cached identity of the signed-in user. An empty token means "not signed
/// in".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredentials {
    #[serde(
        serialize_with = "serialize_secret",
        deserialize_with = "deserialize_secret"
    )]
    pub access_token: SecretString,
    pub login: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<String>,
}

impl Default for StoredCredentials {
    fn default() -> Self {
        StoredCredentials {
            access_token: SecretString::new(String::new()),
            login: None,
            email: None,
            avatar_url: None,
        }
    }
}

// Custom serialization for SecretString
pub fn serialize_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::ser::Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

pub fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: serde::de::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(SecretString::new(s))
}

/// Keyring-backed credential store with a file fallback for systems where
/// no keyring is available.
#[derive(Debug)]
pub struct CredentialStore {
    pub keyring_entry: Option<Arc<Entry>>,
    pub file_path: PathBuf,
}

impl CredentialStore {
    pub fn new() -> Result<Self, CredentialError> {
        // Try to create keyring entry
        let keyring_entry = match Entry::new("gh-explorer", "github_oauth_credentials") {
            Ok(entry) => Some(Arc::new(entry)),
            Err(e) => {
                tracing::warn!(
                    "Keyring is not available on this system ({}), will use file-based storage.",
                    e
                );
                None
            }
        };

        // Path for the fallback credentials file
        let mut file_path = dirs::config_dir().unwrap_or_else(std::env::temp_dir);
        file_path.push("gh-explorer");
        file_path.push("credentials.json");

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).map_err(|e| CredentialError::Generic {
                reason: format!("Failed to create config directory: {}", e),
            })?;
        }

        Ok(CredentialStore {
            keyring_entry,
            file_path,
        })
    }

    /// Returns the stored access token. An empty token counts as absent.
    pub fn access_token(&self) -> Option<String> {
        let creds = self.load().ok().flatten()?;
        let token = creds.access_token.expose_secret().clone();
        if token.is_empty() { None } else { Some(token) }
    }

    pub fn put_access_token(&self, token: &str) -> Result<(), CredentialError> {
        self.update(|creds| creds.access_token = SecretString::new(token.to_string()))
    }

    pub fn put_user_login(&self, login: &str) -> Result<(), CredentialError> {
        self.update(|creds| creds.login = Some(login.to_string()))
    }

    pub fn put_user_email(&self, email: Option<&str>) -> Result<(), CredentialError> {
        self.update(|creds| creds.email = email.map(str::to_string))
    }

    pub fn put_user_avatar(&self, avatar_url: Option<&str>) -> Result<(), CredentialError> {
        self.update(|creds| creds.avatar_url = avatar_url.map(str::to_string))
    }

    // Load-modify-save against whichever backend currently holds the
    // credentials.
    fn update(
        &self,
        apply: impl FnOnce(&mut StoredCredentials),
    ) -> Result<(), CredentialError> {
        let mut creds = self.load()?.unwrap_or_default();
        apply(&mut creds);
        self.save(&creds)
    }

    pub fn save(&self, creds: &StoredCredentials) -> Result<(), CredentialError> {
        // Try keyring first
        if let Some(ref entry) = self.keyring_entry {
            match self.save_to_keyring(entry, creds) {
                Ok(()) => {
                    tracing::debug!("Credentials saved to keyring");
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to save credentials to keyring: {:?}. Trying fallback storage.",
                        e
                    );
                }
            }
        }

        self.save_to_file(creds)
    }

    fn save_to_keyring(
        &self,
        entry: &Entry,
        creds: &StoredCredentials,
    ) -> Result<(), CredentialError> {
        let json = serde_json::to_string(creds)?;
        entry.set_password(&json)?;
        Ok(())
    }

    fn save_to_file(&self, creds: &StoredCredentials) -> Result<(), CredentialError> {
        let json = serde_json::to_string(creds)?;
        fs::write(&self.file_path, json).map_err(|e| CredentialError::Generic {
            reason: format!("Failed to write credentials file: {}", e),
        })?;
        tracing::debug!("Credentials saved to file: {:?}", self.file_path);
        Ok(())
    }

    pub fn load(&self) -> Result<Option<StoredCredentials>, CredentialError> {
        // Try keyring first
        if let Some(ref entry) = self.keyring_entry {
            match self.load_from_keyring(entry) {
                Ok(Some(creds)) => return Ok(Some(creds)),
                Ok(None) => {
                    tracing::debug!("No credentials in keyring, checking file storage");
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to load credentials from keyring: {:?}. Checking file storage.",
                        e
                    );
                }
            }
        }

        match self.load_from_file() {
            Ok(Some(creds)) => {
                // Migrate to the keyring when it is available again
                if let Some(ref entry) = self.keyring_entry
                    && let Err(e) = self.save_to_keyring(entry, &creds)
                {
                    tracing::warn!("Failed to migrate credentials to keyring: {:?}", e);
                }
                Ok(Some(creds))
            }
            other => other,
        }
    }

    fn load_from_keyring(&self, entry: &Entry) -> Result<Option<StoredCredentials>, CredentialError> {
        match entry.get_password() {
            Ok(json) if !json.is_empty() => Ok(Some(serde_json::from_str(&json)?)),
            Ok(_) => Ok(None),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CredentialError::KeyringError { source: e }),
        }
    }

    fn load_from_file(&self) -> Result<Option<StoredCredentials>, CredentialError> {
        if !self.file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&self.file_path).map_err(|e| CredentialError::Generic {
            reason: format!("Failed to read credentials file: {}", e),
        })?;

        if json.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&json)?))
    }

    /// Removes the credentials from every backend.
    pub fn clear(&self) -> Result<(), CredentialError> {
        if let Some(ref entry) = self.keyring_entry {
            match entry.delete_password() {
                Ok(()) => tracing::debug!("Credentials deleted from keyring"),
                Err(keyring::Error::NoEntry) => {}
                Err(e) => tracing::warn!("Failed to delete credentials from keyring: {:?}", e),
            }
        }

        if self.file_path.exists() {
            fs::remove_file(&self.file_path).map_err(|e| CredentialError::Generic {
                reason: format!("Failed to delete credentials file: {}", e),
            })?;
            tracing::debug!("Credentials file deleted: {:?}", self.file_path);
        }

        Ok(())
    }
}
