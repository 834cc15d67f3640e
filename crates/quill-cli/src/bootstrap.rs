use std::sync::Arc;

use anyhow::Context;
use quill_auth::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};
use quill_config::{QuillConfig, SessionConfig, StoreBackend};

use crate::cli::GlobalFlags;

/// Load `.env`, then layered config, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<QuillConfig> {
    load_dotenv()?;

    let mut config = QuillConfig::load().context("failed to load quill configuration")?;
    if let Some(api_url) = &flags.api_url {
        config.api.base_url.clone_from(api_url);
    }
    Ok(config)
}

fn load_dotenv() -> anyhow::Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded dotenv file");
            Ok(())
        }
        Err(error) if error.not_found() => Ok(()),
        Err(error) => Err(error).context("failed to load .env"),
    }
}

/// Build the token store selected by `[session] backend`.
pub fn token_store(config: &SessionConfig) -> anyhow::Result<Arc<dyn TokenStore>> {
    let store: Arc<dyn TokenStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryTokenStore::new()),
        StoreBackend::File => Arc::new(FileTokenStore::new(session_file(config)?)),
        StoreBackend::Keyring => Arc::new(KeyringTokenStore::new(
            config.keyring_service.clone(),
            FileTokenStore::new(session_file(config)?),
        )),
    };
    tracing::debug!(backend = store.name(), "token store selected");
    Ok(store)
}

fn session_file(config: &SessionConfig) -> anyhow::Result<std::path::PathBuf> {
    Ok(config.credentials_file()?)
}
