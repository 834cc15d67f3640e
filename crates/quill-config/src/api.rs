//! Remote blog API configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL the `/api/...` endpoints are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Base URL without a trailing slash, so endpoints can be appended verbatim.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the URL is empty or not http(s).
    pub fn normalized_base_url(&self) -> Result<String, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let reason = if trimmed.is_empty() {
            "must not be empty"
        } else if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            "is not an http(s) URL"
        } else {
            return Ok(trimmed.to_string());
        };
        Err(ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        })
    }
}
