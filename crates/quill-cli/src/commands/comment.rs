use anyhow::Context;
use quill_core::entities::{Comment, CommentDraft};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CommentCommands;
use crate::commands::guard::{ensure_can_mutate, explain_refusal, require_login};
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct CommentView {
    #[serde(flatten)]
    comment: Comment,
    can_edit: bool,
}

#[derive(Serialize)]
struct CommentDeleted {
    deleted: bool,
    id: i64,
    post_id: i64,
}

/// Handle `quill comment`.
pub async fn handle(
    action: CommentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        CommentCommands::List { post_id } => {
            let snapshot = ctx.session.snapshot();
            let limit = flags.limit.map_or(usize::MAX, |limit| limit as usize);
            let views = ctx
                .client
                .list_comments(post_id)
                .await?
                .into_iter()
                .take(limit)
                .map(|comment| CommentView {
                    can_edit: snapshot.authorize(&comment).is_granted(),
                    comment,
                })
                .collect::<Vec<_>>();
            output(&views, flags.format)
        }
        CommentCommands::Create { post_id, content } => {
            require_login(ctx.session.snapshot())?;
            let comment = ctx
                .client
                .create_comment(post_id, &CommentDraft { content })
                .await
                .map_err(explain_refusal)?;
            output(&comment, flags.format)
        }
        CommentCommands::Update { id, post, content } => {
            let snapshot = require_login(ctx.session.snapshot())?;
            let current = find_comment(ctx, post, id).await?;
            ensure_can_mutate(&snapshot, &current, &format!("comment {id}"))?;

            let comment = ctx
                .client
                .update_comment(id, &CommentDraft { content })
                .await
                .map_err(explain_refusal)?;
            output(&comment, flags.format)
        }
        CommentCommands::Delete { id, post } => {
            let snapshot = require_login(ctx.session.snapshot())?;
            let current = find_comment(ctx, post, id).await?;
            ensure_can_mutate(&snapshot, &current, &format!("comment {id}"))?;

            ctx.client
                .delete_comment(id)
                .await
                .map_err(explain_refusal)?;
            output(
                &CommentDeleted {
                    deleted: true,
                    id,
                    post_id: post,
                },
                flags.format,
            )
        }
    }
}

async fn find_comment(ctx: &AppContext, post_id: i64, id: i64) -> anyhow::Result<Comment> {
    ctx.client
        .list_comments(post_id)
        .await?
        .into_iter()
        .find(|comment| comment.id == id)
        .with_context(|| format!("comment {id} not found on post {post_id}"))
}
