// Common test utilities

pub mod fixtures;
pub mod harness;
pub mod pg_harness;

pub use fixtures::*;
pub use harness::*;
pub use pg_harness::*;
