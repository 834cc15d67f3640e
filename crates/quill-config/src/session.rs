//! Session persistence configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_keyring_service() -> String {
    "quill-cli".to_string()
}

/// Where the access token is persisted between runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// OS keychain, falling back to the credentials file.
    #[default]
    Keyring,
    /// Plain `0600` file only.
    File,
    /// Nothing survives the process.
    Memory,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Credentials file. Empty means `~/.quill/session`.
    #[serde(default)]
    pub credentials_path: String,

    /// Keychain service name. Override (e.g. `quill-cli-test`) to keep test
    /// runs away from real credentials.
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            credentials_path: String::new(),
            keyring_service: default_keyring_service(),
        }
    }
}

impl SessionConfig {
    /// `credentials_path` if set, else `~/.quill/session`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoSessionPath` when neither is available.
    pub fn credentials_file(&self) -> Result<PathBuf, ConfigError> {
        if !self.credentials_path.is_empty() {
            return Ok(PathBuf::from(&self.credentials_path));
        }
        dirs::home_dir()
            .map(|home| home.join(".quill").join("session"))
            .ok_or(ConfigError::NoSessionPath)
    }
}
