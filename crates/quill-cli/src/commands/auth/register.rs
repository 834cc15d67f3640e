use anyhow::Context;
use quill_api::{RegisterOutcome, Registration};
use serde::Serialize;

use super::resolve_password;
use crate::cli::GlobalFlags;
use crate::cli::subcommands::auth::AuthRegisterArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthRegisterResponse {
    registered: bool,
    username: String,
    logged_in: bool,
    note: Option<String>,
}

pub async fn handle(
    args: &AuthRegisterArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let registration = Registration {
        username: args.username.clone(),
        email: args.email.clone(),
        password: resolve_password(args.password.as_deref())?,
    };

    let outcome = ctx
        .client
        .register(&registration)
        .await
        .context("auth register failed")?;

    let (logged_in, note) = match outcome {
        RegisterOutcome::Token(token) => {
            let snapshot = ctx
                .session
                .login(token)
                .context("registered, but the issued token was rejected")?;
            (snapshot.is_authenticated, None)
        }
        RegisterOutcome::Registered => (
            false,
            Some(String::from("account created; run `quill auth login` to sign in")),
        ),
    };

    output(
        &AuthRegisterResponse {
            registered: true,
            username: registration.username,
            logged_in,
            note,
        },
        flags.format,
    )
}
