use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{ColorMode, GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `quill` binary.
#[derive(Debug, Parser)]
#[command(name = "quill", version, about = "Quill - blog posts and comments from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max rows to print for list commands
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Table coloring: auto, always, never
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorMode,

    /// Override the configured API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

impl Cli {
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            color: self.color,
            api_url: self.api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Cli, ColorMode, Commands, OutputFormat};
    use crate::cli::subcommands::{AuthCommands, CommentCommands, PostCommands};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "quill", "--format", "table", "--limit", "5", "--verbose", "post", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(5));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Post {
                action: PostCommands::List
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["quill", "auth", "status", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Auth {
                action: AuthCommands::Status
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        assert!(Cli::try_parse_from(["quill", "--format", "xml", "post", "list"]).is_err());
    }

    #[test]
    fn color_defaults_to_auto() {
        let cli = Cli::try_parse_from(["quill", "post", "list"]).expect("cli should parse");
        assert_eq!(cli.color, ColorMode::Auto);
        assert_eq!(cli.global_flags().api_url, None);
    }

    #[test]
    fn api_url_override_is_carried_into_flags() {
        let cli = Cli::try_parse_from(["quill", "--api-url", "https://blog.test", "post", "list"])
            .expect("cli should parse");
        assert_eq!(
            cli.global_flags().api_url.as_deref(),
            Some("https://blog.test")
        );
    }

    #[test]
    fn post_update_takes_optional_fields() {
        let cli = Cli::try_parse_from(["quill", "post", "update", "7", "--title", "New"])
            .expect("cli should parse");
        let Commands::Post {
            action: PostCommands::Update { id, title, content },
        } = cli.command
        else {
            panic!("expected post update");
        };
        assert_eq!(id, 7);
        assert_eq!(title.as_deref(), Some("New"));
        assert_eq!(content, None);
    }

    #[test]
    fn comment_mutations_require_post_id() {
        assert!(
            Cli::try_parse_from(["quill", "comment", "delete", "4"]).is_err(),
            "comment delete without --post must be rejected"
        );
        let cli = Cli::try_parse_from(["quill", "comment", "delete", "4", "--post", "2"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Comment {
                action: CommentCommands::Delete { id: 4, post: 2 }
            }
        ));
    }

    #[test]
    fn login_requires_username() {
        assert!(Cli::try_parse_from(["quill", "auth", "login"]).is_err());
    }
}
