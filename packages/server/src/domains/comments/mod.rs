//! Comments domain - author comments attached to news

pub mod models;

pub use models::comment::Comment;
