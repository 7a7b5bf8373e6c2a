// HTTP middleware
pub mod jwt_auth;
pub mod ownership;

pub use jwt_auth::*;
pub use ownership::*;
