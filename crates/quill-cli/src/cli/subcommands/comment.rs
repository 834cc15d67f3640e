use clap::Subcommand;

/// Comment commands. Mutations name the post so the comment's author can be
/// looked up before anything is sent.
#[derive(Clone, Debug, Subcommand)]
pub enum CommentCommands {
    /// List comments on a post, newest first.
    List { post_id: i64 },
    /// Comment on a post.
    Create {
        post_id: i64,
        #[arg(long)]
        content: String,
    },
    /// Edit one of your comments.
    Update {
        id: i64,
        #[arg(long)]
        post: i64,
        #[arg(long)]
        content: String,
    },
    /// Delete one of your comments.
    Delete {
        id: i64,
        #[arg(long)]
        post: i64,
    },
}
