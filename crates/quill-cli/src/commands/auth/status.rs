use quill_auth::{Eviction, SessionSnapshot};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    username: Option<String>,
    user_id: Option<i64>,
    roles: Vec<String>,
    is_admin: bool,
    expires_at: Option<String>,
    token_source: Option<&'static str>,
    api_url: String,
    note: Option<String>,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let snapshot = ctx.session.snapshot();
    let token_source = snapshot
        .is_authenticated
        .then(|| ctx.session.store().source())
        .flatten();
    let status = build_status(snapshot, token_source, ctx.config.api.base_url.clone());
    output(&status, flags.format)
}

fn build_status(
    snapshot: SessionSnapshot,
    token_source: Option<&'static str>,
    api_url: String,
) -> AuthStatusResponse {
    let note = match snapshot.last_eviction {
        Some(Eviction::Expired) => Some("saved session expired; log in again".to_string()),
        Some(Eviction::Malformed) => {
            Some("saved session was unreadable and has been cleared".to_string())
        }
        None if !snapshot.is_authenticated => Some("not logged in".to_string()),
        None => None,
    };

    let (username, user_id, roles) = match snapshot.identity {
        Some(identity) => (
            Some(identity.username),
            Some(identity.id),
            identity.roles.into_iter().collect(),
        ),
        None => (None, None, Vec::new()),
    };

    AuthStatusResponse {
        authenticated: snapshot.is_authenticated,
        username,
        user_id,
        roles,
        is_admin: snapshot.is_admin,
        expires_at: snapshot.expires_at.map(|at| at.to_rfc3339()),
        token_source,
        api_url,
        note,
    }
}
