//! # quill-config
//!
//! Layered configuration loading for Quill using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`QUILL_*` prefix, `__` as separator)
//! 2. Project-level `.quill/config.toml`
//! 3. User-level `~/.config/quill/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `QUILL_API__BASE_URL` -> `api.base_url`,
//! `QUILL_SESSION__BACKEND` -> `session.backend`, etc.
//!
//! ```no_run
//! use quill_config::QuillConfig;
//!
//! let config = QuillConfig::load().expect("config");
//! println!("API: {}", config.api.base_url);
//! ```

mod api;
mod error;
mod session;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use session::{SessionConfig, StoreBackend};

use std::path::PathBuf;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct QuillConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl QuillConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// `.env` files are not read here; the binary loads them first.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Load` if a source fails to parse or extract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        let local_path = PathBuf::from(".quill/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("QUILL_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("quill").join("config.toml"))
    }
}
