use axum::{extract::Extension, Json};
use serde::{Deserialize, Serialize};

use crate::common::{AuthError, Principal};
use crate::domains::auth::verify_password;
use crate::server::app::AppState;
use crate::server::errors::ApiError;

#[derive(Deserialize, Debug)]
pub struct TokenRequest {
    pub name: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
pub struct TokenResponse {
    pub token: String,
}

/// POST /api/v1/auth/token
///
/// Signs the author's stored roles. Unknown names and wrong passwords get the
/// same answer.
pub async fn issue_token(
    Extension(state): Extension<AppState>,
    Json(request): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let invalid = || ApiError::Unauthorized("Invalid name or password".to_string());

    let author = state
        .deps
        .authors
        .find_by_username(request.name.trim())
        .await?
        .ok_or_else(invalid)?;

    if !verify_password(&request.password, &author.password_hash) {
        tracing::info!(author_id = %author.id, "Rejected login");
        return Err(invalid());
    }

    let token = state
        .deps
        .jwt_service
        .create_token(author.id, &author.name, &author.role_set())?;

    Ok(Json(TokenResponse { token }))
}

/// Caller set by the JWT middleware, if it holds any role
pub(crate) fn authenticated(principal: Option<Extension<Principal>>) -> Result<Principal, AuthError> {
    match principal {
        Some(Extension(principal)) if !principal.roles.is_empty() => Ok(principal),
        _ => Err(AuthError::Unauthenticated),
    }
}
