use thiserror::Error;

use crate::codec::DecodeError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated: run `quill auth login`")]
    NotAuthenticated,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}
