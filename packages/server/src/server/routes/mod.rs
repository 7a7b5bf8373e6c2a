// HTTP routes
pub mod auth;
pub mod authors;
pub mod comments;
pub mod health;
pub mod news;

pub use auth::{issue_token, TokenRequest, TokenResponse};
pub use authors::*;
pub use comments::*;
pub use health::*;
pub use news::*;
