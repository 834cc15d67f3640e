use quill_core::entities::{Post, PostDraft, PostPatch};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::PostCommands;
use crate::commands::guard::{ensure_can_mutate, explain_refusal, require_login};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct PostView {
    #[serde(flatten)]
    post: Post,
    can_edit: bool,
}

#[derive(Serialize)]
struct PostDeleted {
    deleted: bool,
    id: i64,
}

/// Handle `quill post`.
pub async fn handle(
    action: PostCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        PostCommands::List => {
            let mut posts = ctx.client.list_posts().await?;
            if let Some(limit) = flags.limit {
                posts.truncate(limit as usize);
            }
            output(&posts, flags.format)
        }
        PostCommands::Get { id } => {
            let post = ctx.client.get_post(id).await?;
            let can_edit = ctx.session.snapshot().authorize(&post).is_granted();
            output(&PostView { post, can_edit }, flags.format)
        }
        PostCommands::Create { title, content } => {
            require_login(ctx.session.snapshot())?;
            let post = ctx
                .client
                .create_post(&PostDraft { title, content })
                .await
                .map_err(explain_refusal)?;
            output(&post, flags.format)
        }
        PostCommands::Update { id, title, content } => {
            let patch = PostPatch { title, content };
            if patch.is_empty() {
                anyhow::bail!("At least one of --title or --content must be provided");
            }
            let snapshot = require_login(ctx.session.snapshot())?;
            let current = ctx.client.get_post(id).await?;
            ensure_can_mutate(&snapshot, &current, &format!("post {id}"))?;

            let draft = patch.apply_to(&current);
            let post = ctx
                .client
                .update_post(id, &draft)
                .await
                .map_err(explain_refusal)?;
            output(&post, flags.format)
        }
        PostCommands::Delete { id } => {
            let snapshot = require_login(ctx.session.snapshot())?;
            let current = ctx.client.get_post(id).await?;
            ensure_can_mutate(&snapshot, &current, &format!("post {id}"))?;

            ctx.client
                .delete_post(id)
                .await
                .map_err(explain_refusal)?;
            output(&PostDeleted { deleted: true, id }, flags.format)
        }
    }
}
