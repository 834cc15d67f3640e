//! # quill-api
//!
//! Typed client for the blog API. Every call goes through the
//! [`quill_auth::Gateway`], so mutating requests carry the session's bearer
//! token. Non-2xx responses become [`ApiError::Status`] with the server's
//! `message` when it sent one.

pub mod auth;
pub mod client;
pub mod comments;
pub mod error;
pub mod posts;

pub use auth::{Credentials, RegisterOutcome, Registration};
pub use client::BlogClient;
pub use error::ApiError;
