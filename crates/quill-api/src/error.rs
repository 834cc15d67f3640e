use quill_auth::AuthError;
use quill_core::errors::CoreError;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Transport failure or session error from the gateway.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The response body did not have the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Message for a failed call: the body's `message` if it has a usable one,
/// otherwise `"<action> failed with status: <code>"`.
#[must_use]
pub fn error_message(status: StatusCode, body: &[u8], action: &str) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message)
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("{action} failed with status: {}", status.as_u16()))
}

pub(crate) fn status_error(status: StatusCode, body: &[u8], action: &str) -> ApiError {
    let message = error_message(status, body, action);
    tracing::debug!(status = status.as_u16(), action, %message, "api call failed");
    ApiError::Status {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_server_message() {
        let message = error_message(
            StatusCode::UNAUTHORIZED,
            br#"{"message":"Bad credentials","status":401}"#,
            "Login",
        );
        assert_eq!(message, "Bad credentials");
    }

    #[test]
    fn falls_back_on_empty_body() {
        let message = error_message(StatusCode::NOT_FOUND, b"", "Delete post 4");
        assert_eq!(message, "Delete post 4 failed with status: 404");
    }

    #[test]
    fn falls_back_on_non_json_body() {
        let message = error_message(StatusCode::BAD_GATEWAY, b"<html>oops</html>", "Fetch posts");
        assert_eq!(message, "Fetch posts failed with status: 502");
    }

    #[test]
    fn falls_back_on_blank_message() {
        let message = error_message(StatusCode::BAD_REQUEST, br#"{"message":"  "}"#, "Register");
        assert_eq!(message, "Register failed with status: 400");
    }

    #[test]
    fn unauthorized_statuses() {
        let err = ApiError::Status {
            status: 403,
            message: "Forbidden".into(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.to_string(), "Forbidden");
    }

    #[test]
    fn status_error_keeps_code_and_message() {
        let err = status_error(StatusCode::CONFLICT, br#"{"message":"Username taken"}"#, "Register");
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "Username taken");
    }
}
