use std::sync::Arc;

use quill_auth::{ApiRequest, AuthError, Gateway, SessionManager, SessionSnapshot};
use reqwest::Response;
use serde::de::DeserializeOwned;

use crate::auth::{Credentials, RegisterOutcome, Registration, TokenResponse};
use crate::error::{ApiError, status_error};

/// Blog API client bound to one session.
#[derive(Debug, Clone)]
pub struct BlogClient {
    gateway: Gateway,
}

impl BlogClient {
    #[must_use]
    pub const fn new(gateway: Gateway) -> Self {
        Self { gateway }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager> {
        self.gateway.session()
    }

    /// Exchange credentials for an access token. Does not touch the session.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` on rejected credentials and
    /// `ApiError::Decode` if the server answers without a token.
    pub async fn login(&self, credentials: &Credentials) -> Result<String, ApiError> {
        let request = ApiRequest::post("/api/auth/login").json(credentials)?;
        let response = self.gateway.call_public(request).await?;
        let body: TokenResponse = read_json(response, "Login").await?;
        body.into_token()
            .ok_or_else(|| ApiError::Decode("Login failed: no access token received".into()))
    }

    /// Log in and adopt the returned token as the session credential.
    ///
    /// # Errors
    ///
    /// As [`Self::login`], plus `ApiError::Auth` if the issued token cannot be
    /// decoded or persisted.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<SessionSnapshot, ApiError> {
        let token = self.login(credentials).await?;
        Ok(self.session().login(token)?)
    }

    /// Create an account. Some servers answer with a token, some with an
    /// empty acknowledgement.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` if the server rejects the registration.
    pub async fn register(&self, registration: &Registration) -> Result<RegisterOutcome, ApiError> {
        let request = ApiRequest::post("/api/auth/register").json(registration)?;
        let response = self.gateway.call_public(request).await?;
        let status = response.status();
        let bytes = read_bytes(response).await?;
        if !status.is_success() {
            return Err(status_error(status, &bytes, "Registration"));
        }

        let token = serde_json::from_slice::<TokenResponse>(&bytes)
            .unwrap_or_default()
            .into_token();
        Ok(token.map_or(RegisterOutcome::Registered, RegisterOutcome::Token))
    }

    pub(crate) async fn call(&self, request: ApiRequest) -> Result<Response, ApiError> {
        Ok(self.gateway.call(request).await?)
    }
}

pub(crate) async fn read_bytes(response: Response) -> Result<Vec<u8>, ApiError> {
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|e| ApiError::Auth(AuthError::Network(format!("read response body: {e}"))))
}

/// Parse a success body as `T`, or turn a failure status into `ApiError::Status`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: Response,
    action: &str,
) -> Result<T, ApiError> {
    let status = response.status();
    let bytes = read_bytes(response).await?;
    if !status.is_success() {
        return Err(status_error(status, &bytes, action));
    }
    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::warn!(action, error = %e, "unexpected response body");
        ApiError::Decode(format!("{action}: {e}"))
    })
}

/// Accept any success status and ignore the body (e.g. `204 No Content`).
pub(crate) async fn expect_success(response: Response, action: &str) -> Result<(), ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let bytes = read_bytes(response).await?;
    Err(status_error(status, &bytes, action))
}
