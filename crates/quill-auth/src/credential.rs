use std::fmt;

/// An opaque bearer token.
///
/// Immutable once issued and held without surrounding whitespace, so the
/// stored value and the `Authorization` header are the same string. `Debug`
/// never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.len() == token.len() {
            Self(token)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The raw token, for persistence and the `Authorization` header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_token() {
        let credential = Credential::new("aaa.bbb.ccc");
        let rendered = format!("{credential:?}");
        assert!(!rendered.contains("aaa.bbb.ccc"));
        assert!(rendered.contains("redacted"));
    }

    #[test]
    fn surrounding_whitespace_is_dropped() {
        let credential = Credential::new("  a.b.c\n");
        assert_eq!(credential.expose(), "a.b.c");
        assert_eq!(credential.bearer(), "Bearer a.b.c");
    }

    #[test]
    fn bearer_prefixes_scheme() {
        assert_eq!(Credential::new("t0k").bearer(), "Bearer t0k");
    }
}
