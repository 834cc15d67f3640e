//! Login and registration payloads.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Successful login body. `tokenType` is informational only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

impl TokenResponse {
    pub(crate) fn into_token(self) -> Option<String> {
        self.access_token.filter(|token| !token.is_empty())
    }
}

/// What the register endpoint handed back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    /// The server issued a token straight away.
    Token(String),
    /// Account created; log in separately.
    Registered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_response_reads_access_token() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"accessToken":"a.b.c","tokenType":"Bearer"}"#)
                .expect("parses");
        assert_eq!(parsed.into_token().as_deref(), Some("a.b.c"));
    }

    #[test]
    fn empty_access_token_is_none() {
        let parsed: TokenResponse =
            serde_json::from_str(r#"{"accessToken":""}"#).expect("parses");
        assert_eq!(parsed.into_token(), None);
    }
}
