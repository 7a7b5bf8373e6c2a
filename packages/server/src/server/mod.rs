// HTTP server setup (Axum)
pub mod app;
pub mod errors;
pub mod middleware;
pub mod routes;

pub use app::*;
pub use errors::{ApiError, ErrorResponse};
