//! Ownership domain - decides whether a caller may act on a specific author,
//! news item or comment
//!
//! Flow for one guarded call:
//!   principal (call arguments) → locate (path + operation) →
//!   bypass | resolve ownership (store lookups) → verdict → run or deny
//!
//! ADMIN and MODERATOR skip ownership verification everywhere except news
//! paths and comment updates.

pub mod engine;
pub mod guard;
pub mod locator;
pub mod resolver;

pub use engine::{Allowance, AuthorizationEngine, GuardedCall, Verdict};
pub use guard::OwnershipGuard;
pub use locator::{
    bypass_applies, classify, locate, Location, Operation, RequestContext, ResourceFamily,
    ResourceReference, ID_PARAM,
};
pub use resolver::{OwnershipCheck, OwnershipResolver};
