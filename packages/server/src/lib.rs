// News Service - API Core
//
// CRUD backend for authors, news and comments. Mutating and detail-view
// routes on a single resource sit behind an ownership guard that decides,
// before the handler runs, whether the caller may act on that resource.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
