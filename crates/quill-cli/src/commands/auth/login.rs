use anyhow::Context;
use quill_api::Credentials;
use serde::Serialize;

use super::resolve_password;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthLoginArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    username: String,
    user_id: i64,
    is_admin: bool,
    expires_at: Option<String>,
}

pub async fn handle(
    args: &AuthLoginArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let credentials = Credentials {
        username: args.username.clone(),
        password: resolve_password(args.password.as_deref())?,
    };

    let snapshot = ctx
        .client
        .sign_in(&credentials)
        .await
        .context("auth login failed")?;
    let identity = snapshot
        .identity
        .context("login succeeded but no identity was established")?;

    output(
        &AuthLoginResponse {
            authenticated: snapshot.is_authenticated,
            username: identity.username,
            user_id: identity.id,
            is_admin: snapshot.is_admin,
            expires_at: snapshot.expires_at.map(|at| at.to_rfc3339()),
        },
        flags.format,
    )
}
