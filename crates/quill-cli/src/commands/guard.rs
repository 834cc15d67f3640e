//! Local checks run before a mutating request is sent.

use quill_api::ApiError;
use quill_auth::{AccessDecision, SessionSnapshot};
use quill_core::OwnedResource;

/// The current snapshot, or an error telling the user to log in.
pub fn require_login(snapshot: SessionSnapshot) -> anyhow::Result<SessionSnapshot> {
    if !snapshot.is_authenticated {
        anyhow::bail!("not logged in; run `quill auth login` first");
    }
    Ok(snapshot)
}

/// Refuse, without contacting the server, when the session may not change `resource`.
pub fn ensure_can_mutate<R: OwnedResource>(
    snapshot: &SessionSnapshot,
    resource: &R,
    label: &str,
) -> anyhow::Result<()> {
    match snapshot.authorize(resource) {
        AccessDecision::Granted => Ok(()),
        AccessDecision::Denied if !snapshot.is_authenticated => {
            anyhow::bail!("not logged in; run `quill auth login` first")
        }
        AccessDecision::Denied => {
            anyhow::bail!("{label} can only be changed by its author or an admin")
        }
        AccessDecision::Undetermined => anyhow::bail!("session is not loaded yet"),
    }
}

/// Add a re-login hint when the server rejected the session itself.
pub fn explain_refusal(error: ApiError) -> anyhow::Error {
    if error.is_unauthorized() {
        anyhow::Error::new(error)
            .context("the server refused this session; run `quill auth login` again")
    } else {
        error.into()
    }
}
