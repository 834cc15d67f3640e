pub mod auth;
pub mod comment;
pub mod post;

pub use auth::AuthCommands;
pub use comment::CommentCommands;
pub use post::PostCommands;
