use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{OwnedResource, require_text};
use crate::errors::CoreError;

/// Public view of a post's author. The API may send extra fields; they are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// `None` when the author account no longer exists.
    #[serde(default)]
    pub author: Option<Author>,
    pub publication_date: NaiveDateTime,
    #[serde(default)]
    pub comment_count: u32,
}

impl OwnedResource for Post {
    fn author_username(&self) -> Option<&str> {
        self.author.as_ref().map(|a| a.username.as_str())
    }
}

/// Body for creating or replacing a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
}

impl PostDraft {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the title or content is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("title", &self.title)?;
        require_text("content", &self.content)
    }
}

/// Partial edit of a post. Missing fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Merge onto an existing post to produce the full replacement body.
    #[must_use]
    pub fn apply_to(self, post: &Post) -> PostDraft {
        PostDraft {
            title: self.title.unwrap_or_else(|| post.title.clone()),
            content: self.content.unwrap_or_else(|| post.content.clone()),
        }
    }
}
