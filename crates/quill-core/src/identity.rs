use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Role string that grants administrative privileges over every resource.
pub const ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Authenticated user identity, derived from a validated claim set.
///
/// Produced by `quill-auth`, consumed by `quill-cli`. Contains only data
/// fields. It is never built partially: either all of `id`, `username` and
/// `roles` are known or there is no identity at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric account id (JWT `id` claim).
    pub id: i64,
    /// Human-facing username (JWT `sub` claim).
    pub username: String,
    /// Granted roles (JWT `roles` claim). Empty when the claim is absent.
    pub roles: BTreeSet<String>,
}

impl Identity {
    #[must_use]
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}
