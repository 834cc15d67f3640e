//! Comment endpoints. Listing and creation are nested under a post; edits
//! and deletes address the comment directly.

use quill_auth::ApiRequest;
use quill_core::entities::{Comment, CommentDraft};

use crate::client::{BlogClient, expect_success, read_json};
use crate::error::ApiError;

impl BlogClient {
    /// Comments on `post_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the post does not exist.
    pub async fn list_comments(&self, post_id: i64) -> Result<Vec<Comment>, ApiError> {
        let response = self
            .call(ApiRequest::get(format!("/api/posts/{post_id}/comments")))
            .await?;
        let mut comments: Vec<Comment> =
            read_json(response, &format!("Fetch comments for post {post_id}")).await?;
        comments.sort_by(|a, b| b.publication_date.cmp(&a.publication_date));
        Ok(comments)
    }

    /// # Errors
    ///
    /// Returns `ApiError::Core` for blank content (nothing is sent) and
    /// `ApiError::Status` if the server refuses.
    pub async fn create_comment(
        &self,
        post_id: i64,
        draft: &CommentDraft,
    ) -> Result<Comment, ApiError> {
        draft.validate()?;
        let request = ApiRequest::post(format!("/api/posts/{post_id}/comments")).json(draft)?;
        let response = self.call(request).await?;
        read_json(response, "Create comment").await
    }

    /// # Errors
    ///
    /// See [`Self::create_comment`].
    pub async fn update_comment(
        &self,
        id: i64,
        draft: &CommentDraft,
    ) -> Result<Comment, ApiError> {
        draft.validate()?;
        let request = ApiRequest::put(format!("/api/comments/{id}")).json(draft)?;
        let response = self.call(request).await?;
        read_json(response, &format!("Update comment {id}")).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Status` if the server refuses.
    pub async fn delete_comment(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .call(ApiRequest::delete(format!("/api/comments/{id}")))
            .await?;
        expect_success(response, &format!("Delete comment {id}")).await
    }
}
