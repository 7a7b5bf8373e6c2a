use axum::{
    body::Body,
    extract::{FromRequestParts, RawPathParams},
    http::{Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use tracing::debug;

use crate::common::{AuthError, CallArgument, Principal};
use crate::domains::ownership::{GuardedCall, Operation, OwnershipGuard, RequestContext};

/// Ownership guard middleware
///
/// Must be installed with `route_layer` so the path parameters of the matched
/// route are available. Builds a `GuardedCall` from the request (principal
/// from `jwt_auth_middleware`, path, placeholders, operation from the HTTP
/// method) and only forwards to the handler on an allow verdict.
pub async fn ownership_guard_middleware(
    guard: OwnershipGuard,
    request: Request<Body>,
    next: Next,
) -> Response {
    let Some(operation) = operation_for(request.method()) else {
        return StatusCode::METHOD_NOT_ALLOWED.into_response();
    };

    let (mut parts, body) = request.into_parts();

    let path_params = RawPathParams::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|params| {
            params
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect::<HashMap<_, _>>()
        });

    let mut args = Vec::new();
    if let Some(principal) = parts.extensions.get::<Principal>() {
        args.push(CallArgument::Principal(principal.clone()));
    }

    let call = GuardedCall::new(
        operation,
        args,
        RequestContext {
            path: parts.uri.path().to_string(),
            path_params,
        },
    );

    debug!(operation = %operation, path = %parts.uri.path(), "Checking ownership");

    let request = Request::from_parts(parts, body);

    guard
        .guard(&call, || async move { Ok::<_, AuthError>(next.run(request).await) })
        .await
        .unwrap_or_else(IntoResponse::into_response)
}

/// Operation name implied by the HTTP method
pub fn operation_for(method: &Method) -> Option<Operation> {
    match *method {
        Method::GET | Method::HEAD => Some(Operation::FindById),
        Method::POST => Some(Operation::Create),
        Method::PUT | Method::PATCH => Some(Operation::Update),
        Method::DELETE => Some(Operation::Delete),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_for_method() {
        assert_eq!(operation_for(&Method::GET), Some(Operation::FindById));
        assert_eq!(operation_for(&Method::PUT), Some(Operation::Update));
        assert_eq!(operation_for(&Method::PATCH), Some(Operation::Update));
        assert_eq!(operation_for(&Method::DELETE), Some(Operation::Delete));
        assert_eq!(operation_for(&Method::OPTIONS), None);
    }
}
