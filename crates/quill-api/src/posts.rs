//! `/api/posts` endpoints.

use quill_auth::ApiRequest;
use quill_core::entities::{Post, PostDraft};
use quill_core::errors::CoreError;

use crate::client::{BlogClient, expect_success, read_json};
use crate::error::ApiError;

impl BlogClient {
    /// # Errors
    ///
    /// Returns `ApiError` if the request fails or the body is not a post list.
    pub async fn list_posts(&self) -> Result<Vec<Post>, ApiError> {
        let response = self.call(ApiRequest::get("/api/posts")).await?;
        read_json(response, "Fetch posts").await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Core(CoreError::NotFound)` for an unknown id.
    pub async fn get_post(&self, id: i64) -> Result<Post, ApiError> {
        let response = self.call(ApiRequest::get(format!("/api/posts/{id}"))).await?;
        match read_json(response, &format!("Fetch post {id}")).await {
            Err(ApiError::Status { status: 404, .. }) => Err(CoreError::NotFound {
                entity_type: "post".into(),
                id: id.to_string(),
            }
            .into()),
            other => other,
        }
    }

    /// # Errors
    ///
    /// Returns `ApiError::Core` for a blank draft (nothing is sent) and
    /// `ApiError::Status` if the server refuses.
    pub async fn create_post(&self, draft: &PostDraft) -> Result<Post, ApiError> {
        draft.validate()?;
        let response = self.call(ApiRequest::post("/api/posts").json(draft)?).await?;
        read_json(response, "Create post").await
    }

    /// # Errors
    ///
    /// See [`Self::create_post`].
    pub async fn update_post(&self, id: i64, draft: &PostDraft) -> Result<Post, ApiError> {
        draft.validate()?;
        let request = ApiRequest::put(format!("/api/posts/{id}")).json(draft)?;
        let response = self.call(request).await?;
        read_json(response, &format!("Update post {id}")).await
    }

    /// # Errors
    ///
    /// Returns `ApiError::Status` if the server refuses.
    pub async fn delete_post(&self, id: i64) -> Result<(), ApiError> {
        let response = self
            .call(ApiRequest::delete(format!("/api/posts/{id}")))
            .await?;
        expect_success(response, &format!("Delete post {id}")).await
    }
}
