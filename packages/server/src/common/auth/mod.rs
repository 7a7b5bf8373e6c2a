//! Identity types shared by the authentication middleware and the
//! ownership guard:
//!
//! ```rust
//! use news_core::common::auth::{resolve_principal, CallArgument, Principal, Role};
//!
//! let args = vec![CallArgument::Principal(Principal::new("alice", [Role::User]))];
//! let principal = resolve_principal(&args).unwrap();
//! assert!(!principal.is_privileged());
//! ```

mod errors;
mod principal;
mod role;

pub use errors::AuthError;
pub use principal::{resolve_principal, CallArgument, Principal};
pub use role::Role;
