use thiserror::Error;

use crate::domains::ownership::ResourceFamily;

/// Authorization errors for guarded operations
///
/// Every variant is local to one call and never retried.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Access denied: user is not authenticated")]
    Unauthenticated,

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Access denied: no resource family matches path {0}")]
    Unroutable(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{}", not_owner_message(.family))]
    NotOwner { family: ResourceFamily },

    #[error("Access denied: request attributes not found")]
    RequestContextMissing,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl AuthError {
    /// True for the variants that deny access outright (as opposed to
    /// client errors, missing resources, or infrastructure failures).
    pub fn is_access_denied(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated
                | Self::Unroutable(_)
                | Self::NotOwner { .. }
                | Self::RequestContextMissing
        )
    }
}

fn not_owner_message(family: &ResourceFamily) -> &'static str {
    match family {
        ResourceFamily::Author => "Access denied: you may only act on your own author account",
        ResourceFamily::News => "Access denied: you are not the owner of this news",
        ResourceFamily::Comment => "Access denied: you are not the owner of this comment",
    }
}
