use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use quill_core::Identity;

/// Claims decoded from a Quill access token.
///
/// Produced by [`crate::codec::decode`], which guarantees `subject` and `id`
/// were present and well-typed. Consumed by the session manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimSet {
    /// Username (`sub` claim).
    pub subject: String,
    /// Numeric account id (`id` claim).
    pub id: i64,
    /// Granted roles (`roles` claim). Empty when the claim is absent.
    pub roles: BTreeSet<String>,
    /// Issue time (`iat` claim).
    pub issued_at: Option<DateTime<Utc>>,
    /// Expiration time (`exp` claim). `None` means the token never expires client-side.
    pub expires_at: Option<DateTime<Utc>>,
}

impl ClaimSet {
    /// Convert to the application-facing identity.
    #[must_use]
    pub fn to_identity(&self) -> Identity {
        Identity {
            id: self.id,
            username: self.subject.clone(),
            roles: self.roles.clone(),
        }
    }

    /// Whether the token has expired at `now`.
    ///
    /// Compared in milliseconds, strictly: a token whose expiry equals `now` is
    /// still valid.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at
            .is_some_and(|exp| exp.timestamp_millis() < now.timestamp_millis())
    }
}
