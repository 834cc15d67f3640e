pub mod auth;
pub mod comment;
pub mod dispatch;
pub mod guard;
pub mod post;
