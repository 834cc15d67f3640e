use clap::{Args, Subcommand};

/// Authentication commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuthCommands {
    /// Log in with username and password.
    Login(AuthLoginArgs),
    /// Create an account (logs in when the server returns a token).
    Register(AuthRegisterArgs),
    /// Forget the stored session.
    Logout,
    /// Show who is logged in.
    Status,
}

#[derive(Clone, Debug, Args)]
pub struct AuthLoginArgs {
    #[arg(long)]
    pub username: String,
    /// Prompted on stdin when omitted.
    #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct AuthRegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    /// Prompted on stdin when omitted.
    #[arg(long, env = "QUILL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}
