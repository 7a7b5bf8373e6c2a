// Business domains
pub mod auth;
pub mod authors;
pub mod comments;
pub mod news;
pub mod ownership;
