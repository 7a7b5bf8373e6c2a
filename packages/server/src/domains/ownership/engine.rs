//! Authorization decision engine.
//!
//! Evaluation order for a guarded call:
//!
//! 1. no authenticated principal among the arguments: deny `Unauthenticated`
//! 2. no request context at all: deny `RequestContextMissing`
//! 3. locate the target (id first, then bypass, then family)
//! 4. privileged caller where bypass applies: allow
//! 5. resolve ownership; owner: allow, otherwise deny `NotOwner`
//!
//! Lookup failures (`NotFound`, store errors) are returned as the denial
//! reason unchanged.

use tracing::{debug, info, warn};

use super::{locate, Location, Operation, OwnershipCheck, OwnershipResolver, RequestContext};
use crate::common::auth::resolve_principal;
use crate::common::{AuthError, CallArgument};

/// Everything the host hands over about one guarded call
#[derive(Debug, Clone)]
pub struct GuardedCall {
    pub operation: Operation,
    pub args: Vec<CallArgument>,
    /// `None` when the host could not provide any request information
    pub request: Option<RequestContext>,
}

impl GuardedCall {
    pub fn new(operation: Operation, args: Vec<CallArgument>, request: RequestContext) -> Self {
        Self {
            operation,
            args,
            request: Some(request),
        }
    }
}

/// Why a call was allowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Allowance {
    /// ADMIN/MODERATOR skipped ownership verification
    Bypassed,
    /// Caller owns the resource
    Owner(OwnershipCheck),
}

#[derive(Debug)]
pub enum Verdict {
    Allow(Allowance),
    Deny(AuthError),
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow(_))
    }

    pub fn into_result(self) -> Result<Allowance, AuthError> {
        match self {
            Verdict::Allow(allowance) => Ok(allowance),
            Verdict::Deny(reason) => Err(reason),
        }
    }
}

#[derive(Clone)]
pub struct AuthorizationEngine {
    resolver: OwnershipResolver,
}

impl AuthorizationEngine {
    pub fn new(resolver: OwnershipResolver) -> Self {
        Self { resolver }
    }

    /// Decide whether `call` may proceed. Holds no state between calls.
    pub async fn decide(&self, call: &GuardedCall) -> Verdict {
        match self.evaluate(call).await {
            Ok(allowance) => Verdict::Allow(allowance),
            Err(reason) => Verdict::Deny(reason),
        }
    }

    async fn evaluate(&self, call: &GuardedCall) -> Result<Allowance, AuthError> {
        let operation = call.operation;

        let principal = resolve_principal(&call.args).inspect_err(|_| {
            warn!(operation = %operation, "No authenticated principal for guarded call");
        })?;

        info!(
            username = %principal.username,
            roles = %principal.authorities(),
            operation = %operation,
            "Guarded call"
        );

        let request = call.request.as_ref().ok_or_else(|| {
            warn!(operation = %operation, "Request context missing");
            AuthError::RequestContextMissing
        })?;

        let reference = match locate(request, operation, principal)? {
            Location::Bypass => {
                debug!(
                    username = %principal.username,
                    roles = %principal.authorities(),
                    path = %request.path,
                    "Allowed by privileged role"
                );
                return Ok(Allowance::Bypassed);
            }
            Location::Resource(reference) => reference,
        };

        debug!(
            path = %request.path,
            family = %reference.family,
            target_id = reference.id,
            "Classified guarded request"
        );

        let check = self.resolver.resolve(principal, reference).await?;

        if check.is_owner() {
            info!(
                caller_author_id = %check.caller_author_id,
                family = %reference.family,
                target_id = reference.id,
                "Ownership verified"
            );
            Ok(Allowance::Owner(check))
        } else {
            warn!(
                caller_author_id = %check.caller_author_id,
                owner_id = %check.owner_id,
                family = %reference.family,
                target_id = reference.id,
                "Ownership check failed"
            );
            Err(AuthError::NotOwner {
                family: reference.family,
            })
        }
    }
}
