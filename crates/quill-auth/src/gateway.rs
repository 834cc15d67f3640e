//! Outbound API requests with the session's bearer token attached.
//!
//! The credential is looked up when a request is sent, not when the gateway
//! is built, so a login or logout between two calls is seen by the second.
//! A request already in flight keeps the credential it started with.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response};
use serde::Serialize;

use crate::credential::Credential;
use crate::error::AuthError;
use crate::session::SessionManager;

/// One API call: method, endpoint path, caller headers and optional body.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    endpoint: String,
    headers: HeaderMap,
    body: Option<Vec<u8>>,
}

impl ApiRequest {
    #[must_use]
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::GET, endpoint)
    }

    #[must_use]
    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::POST, endpoint)
    }

    #[must_use]
    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PUT, endpoint)
    }

    #[must_use]
    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(Method::PATCH, endpoint)
    }

    #[must_use]
    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    /// Serialize `body` as JSON. The content type is left to the gateway.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidRequest` if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, AuthError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| AuthError::InvalidRequest(format!("serialize body: {e}")))?;
        self.body = Some(bytes);
        Ok(self)
    }

    #[must_use]
    pub fn body(mut self, bytes: impl Into<Vec<u8>>) -> Self {
        self.body = Some(bytes.into());
        self
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Sends [`ApiRequest`]s to the API, authenticated as the current session.
#[derive(Debug, Clone)]
pub struct Gateway {
    client: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
}

impl Gateway {
    /// # Errors
    ///
    /// Returns `AuthError::Network` if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        session: Arc<SessionManager>,
    ) -> Result<Self, AuthError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AuthError::Network(format!("build http client: {e}")))?;
        Ok(Self::with_client(client, base_url, session))
    }

    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        session: Arc<SessionManager>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    #[must_use]
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send `request` with `Authorization: Bearer <token>` when a session exists,
    /// or without any authorization when it does not.
    ///
    /// The raw response is returned whatever its status.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Network` if the request does not complete and
    /// `AuthError::InvalidRequest` if the token cannot form a header value.
    pub async fn call(&self, request: ApiRequest) -> Result<Response, AuthError> {
        let credential = self.session.credential();
        self.send(request, credential.as_ref()).await
    }

    /// Send `request` without any credential, for the login and register
    /// endpoints.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Network` if the request does not complete.
    pub async fn call_public(&self, request: ApiRequest) -> Result<Response, AuthError> {
        self.send(request, None).await
    }

    async fn send(
        &self,
        request: ApiRequest,
        credential: Option<&Credential>,
    ) -> Result<Response, AuthError> {
        let ApiRequest {
            method,
            endpoint,
            mut headers,
            body,
        } = request;

        if let Some(credential) = credential {
            let mut value = HeaderValue::from_str(&credential.bearer()).map_err(|_| {
                AuthError::InvalidRequest("access token is not a valid header value".into())
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        if body.is_some() && carries_body(&method) && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let url = format!("{}{endpoint}", self.base_url);
        tracing::debug!(
            %method,
            %url,
            authenticated = credential.is_some(),
            "sending api request"
        );

        let mut builder = self.client.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        builder
            .send()
            .await
            .map_err(|e| AuthError::Network(format!("{method} {endpoint}: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_post_put_patch_carry_bodies() {
        assert!(carries_body(&Method::POST));
        assert!(carries_body(&Method::PUT));
        assert!(carries_body(&Method::PATCH));
        assert!(!carries_body(&Method::GET));
        assert!(!carries_body(&Method::DELETE));
    }

    #[test]
    fn json_body_is_serialized() {
        let request = ApiRequest::post("/api/posts")
            .json(&serde_json::json!({"title": "t"}))
            .expect("serializable");
        assert_eq!(request.body.as_deref(), Some(br#"{"title":"t"}"#.as_slice()));
        assert!(request.headers.is_empty());
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let session = Arc::new(SessionManager::new(crate::MemoryTokenStore::new()));
        let gateway =
            Gateway::with_client(reqwest::Client::new(), "http://localhost:8080/", session);
        assert_eq!(gateway.base_url(), "http://localhost:8080");
    }
}
