use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or `QUILL_*` variable does not fit the schema.
    #[error("failed to load quill configuration: {0}")]
    Load(#[from] figment::Error),

    #[error("api.base_url '{url}' {reason}")]
    InvalidBaseUrl { url: String, reason: &'static str },

    /// No `credentials_path` was configured and there is no home directory
    /// to put the default session file in.
    #[error("cannot locate the session file; set QUILL_SESSION__CREDENTIALS_PATH")]
    NoSessionPath,
}
