use clap::Subcommand;

use crate::cli::subcommands::{AuthCommands, CommentCommands, PostCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign out, and inspect the stored session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Blog posts.
    Post {
        #[command(subcommand)]
        action: PostCommands,
    },
    /// Comments on posts.
    Comment {
        #[command(subcommand)]
        action: CommentCommands,
    },
}
