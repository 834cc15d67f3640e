use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
    was_authenticated: bool,
}

pub fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let was_authenticated = ctx.session.snapshot().is_authenticated;
    let snapshot = ctx.session.logout();
    output(
        &AuthLogoutResponse {
            cleared: !snapshot.is_authenticated,
            was_authenticated,
        },
        flags.format,
    )
}
