//! Runs an operation only after the ownership verdict allows it.

use std::future::Future;
use std::sync::Arc;

use super::{AuthorizationEngine, GuardedCall, OwnershipResolver, Verdict};
use crate::common::AuthError;
use crate::kernel::ServerDeps;

/// Wraps an arbitrary operation with the ownership check
///
/// Usage:
/// ```ignore
/// let updated = guard
///     .guard(&call, || async { news_store.update(id, changes).await })
///     .await?;
/// ```
///
/// The operation runs at most once, and only after an allow verdict. Its
/// output and its own errors are returned untouched; a denial is converted
/// into the operation's error type through `From<AuthError>`.
#[derive(Clone)]
pub struct OwnershipGuard {
    engine: Arc<AuthorizationEngine>,
}

impl OwnershipGuard {
    pub fn new(engine: AuthorizationEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }

    pub fn from_deps(deps: &ServerDeps) -> Self {
        Self::new(AuthorizationEngine::new(OwnershipResolver::from_deps(deps)))
    }

    pub async fn guard<F, Fut, T, E>(&self, call: &GuardedCall, operation: F) -> Result<T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: From<AuthError>,
    {
        match self.engine.decide(call).await {
            Verdict::Allow(_) => operation().await,
            Verdict::Deny(reason) => Err(reason.into()),
        }
    }
}
