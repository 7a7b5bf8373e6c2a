use crate::common::{AuthError, Principal};
use crate::domains::auth::{Claims, JwtService};
use crate::kernel::BaseAuthorStore;
use axum::{
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::debug;

/// JWT authentication middleware
///
/// Extracts JWT token from Authorization header, verifies it, reloads the
/// author the token was issued for and adds the caller's `Principal` to
/// request extensions. Name and roles come from the author row, never from
/// the claims.
/// If no token, an invalid token, or the author no longer exists, the request
/// continues anonymously; guarded routes then reject it.
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    authors: Arc<dyn BaseAuthorStore>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let Some(claims) = extract_claims(&request, &jwt_service) else {
        debug!("No valid authentication token");
        return next.run(request).await;
    };

    match load_principal(&claims, authors.as_ref()).await {
        Ok(Some(principal)) => {
            debug!(
                username = %principal.username,
                roles = %principal.authorities(),
                "Authenticated request"
            );
            request.extensions_mut().insert(principal);
        }
        Ok(None) => {
            debug!(author_id = %claims.author_id, "Token author no longer exists");
        }
        Err(e) => return AuthError::InternalError(e).into_response(),
    }

    next.run(request).await
}

/// Extract and verify JWT token from request
fn extract_claims(
    request: &axum::http::Request<axum::body::Body>,
    jwt_service: &JwtService,
) -> Option<Claims> {
    // Get Authorization header
    let auth_header = request.headers().get("authorization")?;
    let auth_str = auth_header.to_str().ok()?;

    // Extract token (handle both "Bearer <token>" and raw token)
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str);

    jwt_service.verify_token(token).ok()
}

async fn load_principal(
    claims: &Claims,
    authors: &dyn BaseAuthorStore,
) -> anyhow::Result<Option<Principal>> {
    let author = authors.find_by_id(claims.author_id).await?;
    Ok(author.map(|author| Principal::new(author.name.clone(), author.role_set())))
}
