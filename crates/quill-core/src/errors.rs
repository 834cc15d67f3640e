//! Cross-cutting error types for Quill.
//!
//! Domain-specific errors (`AuthError`, `ApiError`, `ConfigError`) live in
//! their respective crates and converge into `anyhow` in `quill-cli`.

use thiserror::Error;

/// Errors that can be raised by any Quill crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (empty title, blank comment, ...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
