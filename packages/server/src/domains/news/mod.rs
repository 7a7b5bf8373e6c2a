//! News domain - articles owned by a single author

pub mod models;

pub use models::news::{News, NewsChanges};
