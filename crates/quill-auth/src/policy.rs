//! Author-or-admin authorization, shared by every resource kind.

use quill_core::Identity;
use serde::Serialize;

/// Outcome of an authorization check against a session snapshot.
///
/// `Denied` is an ordinary answer, not an error. `Undetermined` means the
/// session has not finished loading and the caller should wait rather than
/// treat the action as forbidden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Granted,
    Denied,
    Undetermined,
}

impl AccessDecision {
    #[must_use]
    pub const fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl From<bool> for AccessDecision {
    fn from(granted: bool) -> Self {
        if granted { Self::Granted } else { Self::Denied }
    }
}

/// Whether `identity` may edit or delete a resource written by `author`.
///
/// True iff there is an identity and it either authored the resource or is
/// an admin. A resource without an attributable author is never mutable,
/// not even by an admin.
#[must_use]
pub fn can_mutate(identity: Option<&Identity>, author: Option<&str>, is_admin: bool) -> bool {
    let (Some(identity), Some(author)) = (identity, author) else {
        return false;
    };
    identity.username == author || is_admin
}
