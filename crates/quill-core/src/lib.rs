//! # quill-core
//!
//! Core types shared across all Quill crates:
//! - The authenticated `Identity` and the admin role marker
//! - Blog entities (posts, comments) as they appear on the wire
//! - The `OwnedResource` seam used by the authorization policy
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod identity;

pub use entities::OwnedResource;
pub use identity::{ADMIN_ROLE, Identity};
