use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{OwnedResource, require_text};
use crate::errors::CoreError;

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub publication_date: NaiveDateTime,
    #[serde(default)]
    pub author_username: Option<String>,
    #[serde(default)]
    pub author_id: Option<i64>,
    pub post_id: i64,
}

impl OwnedResource for Comment {
    fn author_username(&self) -> Option<&str> {
        self.author_username.as_deref()
    }
}

/// Body for creating or replacing a comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentDraft {
    pub content: String,
}

impl CommentDraft {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the content is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("content", &self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_api_shape() {
        let comment: Comment = serde_json::from_str(
            r#"{
                "id": 11,
                "content": "Nice",
                "publicationDate": "2024-05-02T08:00:00",
                "authorUsername": "bob",
                "authorId": 2,
                "postId": 3
            }"#,
        )
        .expect("comment parses");
        assert_eq!(comment.author_username(), Some("bob"));
        assert_eq!(comment.post_id, 3);
    }

    #[test]
    fn missing_author_fields_default_to_none() {
        let comment: Comment = serde_json::from_str(
            r#"{"id": 1, "content": "x", "publicationDate": "2024-05-02T08:00:00", "postId": 3}"#,
        )
        .expect("comment parses");
        assert_eq!(comment.author_username(), None);
        assert_eq!(comment.author_id, None);
    }
}
