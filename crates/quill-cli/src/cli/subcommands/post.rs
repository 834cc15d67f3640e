use clap::Subcommand;

/// Post commands.
#[derive(Clone, Debug, Subcommand)]
pub enum PostCommands {
    /// List posts.
    List,
    /// Show one post.
    Get { id: i64 },
    /// Publish a post.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
    },
    /// Edit one of your posts.
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },
    /// Delete one of your posts.
    Delete { id: i64 },
}
