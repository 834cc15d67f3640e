//! # quill-auth
//!
//! Client-side session core for Quill.
//!
//! - [`codec`] decodes a bearer token into a [`ClaimSet`] (no signature check;
//!   the issuing server owns verification).
//! - [`token_store`] persists exactly one token across runs (keyring, file, memory).
//! - [`session`] owns the live session: initialize, login, logout, expiry eviction.
//! - [`gateway`] sends API requests, attaching the current bearer token.
//! - [`policy`] decides whether an identity may mutate an owned resource.

pub mod claims;
pub mod codec;
pub mod credential;
pub mod error;
pub mod gateway;
pub mod policy;
pub mod session;
pub mod token_store;

pub use claims::ClaimSet;
pub use codec::DecodeError;
pub use credential::Credential;
pub use error::AuthError;
pub use gateway::{ApiRequest, Gateway};
pub use policy::{AccessDecision, can_mutate};
pub use session::{Eviction, SessionManager, SessionPhase, SessionSnapshot};
pub use token_store::{FileTokenStore, KeyringTokenStore, MemoryTokenStore, TokenStore};
