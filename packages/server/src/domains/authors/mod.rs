//! Authors domain - author accounts, which also serve as login identities

pub mod models;

pub use models::author::{Author, AuthorNameTaken};
