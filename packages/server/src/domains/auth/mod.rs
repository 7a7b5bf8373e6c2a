//! Auth domain - token-based authentication
//!
//! Tokens are HS256 JWTs issued for one author row. The roles claim is only
//! informational: every request reloads the author and takes its name and
//! roles from the store, so demotions and renames apply immediately.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtService};
pub use password::{hash_password, verify_password};
