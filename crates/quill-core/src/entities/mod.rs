//! Blog entities as exchanged with the API.
//!
//! Field names follow the API's camelCase JSON. Posts and comments are owned
//! by the server; the client only reads them and checks who may mutate them.

mod comment;
mod post;

pub use comment::{Comment, CommentDraft};
pub use post::{Author, Post, PostDraft, PostPatch};

/// A resource whose mutation is restricted to its author (or an admin).
///
/// Implemented identically for every resource kind so that the one
/// authorization rule applies uniformly.
pub trait OwnedResource {
    /// Username of the author, if the resource has an attributable author.
    fn author_username(&self) -> Option<&str>;
}

impl<T: OwnedResource + ?Sized> OwnedResource for &T {
    fn author_username(&self) -> Option<&str> {
        (**self).author_username()
    }
}

/// Trimmed-emptiness check shared by the draft validators.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), crate::errors::CoreError> {
    if value.trim().is_empty() {
        return Err(crate::errors::CoreError::Validation(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
