//! Kernel module - server infrastructure and dependencies.

pub mod deps;
pub mod test_dependencies;
pub mod traits;

pub use deps::{PgStore, ServerDeps};
pub use test_dependencies::InMemoryStore;
pub use traits::*;
