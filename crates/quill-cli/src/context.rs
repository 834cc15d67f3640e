use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use quill_api::BlogClient;
use quill_auth::{Gateway, SessionManager};
use quill_config::QuillConfig;

use crate::bootstrap;

/// Session and API client shared by every command, built once in `main`.
pub struct AppContext {
    pub config: QuillConfig,
    pub session: Arc<SessionManager>,
    pub client: BlogClient,
}

impl AppContext {
    /// Open the configured token store and restore any saved session from it.
    pub fn init(config: QuillConfig) -> anyhow::Result<Self> {
        let store = bootstrap::token_store(&config.session)?;
        let session = Arc::new(SessionManager::new(store));
        let snapshot = session.initialize();
        tracing::debug!(
            authenticated = snapshot.is_authenticated,
            eviction = ?snapshot.last_eviction,
            "session restored"
        );

        let base_url = config
            .api
            .normalized_base_url()
            .context("invalid API configuration")?;
        let gateway = Gateway::new(
            base_url,
            Duration::from_secs(config.api.timeout_secs),
            Arc::clone(&session),
        )?;

        Ok(Self {
            config,
            session,
            client: BlogClient::new(gateway),
        })
    }
}
