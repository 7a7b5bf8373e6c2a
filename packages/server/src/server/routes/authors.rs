use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{AuthorId, Role};
use crate::domains::auth::hash_password;
use crate::domains::authors::Author;
use crate::server::app::AppState;
use crate::server::errors::ApiError;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: AuthorId,
    pub name: String,
    pub roles: Vec<Role>,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            roles: author.role_set(),
            id: author.id,
            name: author.name,
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct UpdateAuthorRequest {
    pub name: String,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AccountQuery {
    pub role_type: Role,
}

#[derive(Deserialize, Debug)]
pub struct CreateAccountRequest {
    pub name: String,
    pub password: String,
}

const NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=30;
const PASSWORD_LENGTH: std::ops::RangeInclusive<usize> = 8..=30;

fn validate_name(name: &str) -> Result<(), ApiError> {
    if !NAME_LENGTH.contains(&name.chars().count()) {
        return Err(ApiError::BadRequest(
            "Author name must be between 3 and 30 characters".to_string(),
        ));
    }
    Ok(())
}

fn author_not_found(id: AuthorId) -> ApiError {
    ApiError::NotFound(format!("Author with ID {} not found", id))
}

/// POST /api/v1/author/account?roleType=
pub async fn create_author_account(
    Extension(state): Extension<AppState>,
    Query(query): Query<AccountQuery>,
    Json(request): Json<CreateAccountRequest>,
) -> Result<(StatusCode, Json<AuthorResponse>), ApiError> {
    let name = request.name.trim();
    validate_name(name)?;
    if !PASSWORD_LENGTH.contains(&request.password.chars().count()) {
        return Err(ApiError::BadRequest(
            "Password must be between 8 and 30 characters".to_string(),
        ));
    }

    let author = state
        .deps
        .authors
        .create(name, &hash_password(&request.password), &[query.role_type])
        .await?;

    tracing::info!(author_id = %author.id, role = %query.role_type, "Created author account");
    Ok((StatusCode::CREATED, Json(author.into())))
}

/// GET /api/v1/author/:id
pub async fn find_author(
    Extension(state): Extension<AppState>,
    Path(id): Path<AuthorId>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let author = state
        .deps
        .authors
        .find_by_id(id)
        .await?
        .ok_or_else(|| author_not_found(id))?;

    Ok(Json(author.into()))
}

/// PUT /api/v1/author/:id
pub async fn update_author(
    Extension(state): Extension<AppState>,
    Path(id): Path<AuthorId>,
    Json(request): Json<UpdateAuthorRequest>,
) -> Result<Json<AuthorResponse>, ApiError> {
    let name = request.name.trim();
    validate_name(name)?;

    let author = state
        .deps
        .authors
        .update_name(id, name)
        .await?
        .ok_or_else(|| author_not_found(id))?;

    Ok(Json(author.into()))
}

/// DELETE /api/v1/author/:id
pub async fn delete_author(
    Extension(state): Extension<AppState>,
    Path(id): Path<AuthorId>,
) -> Result<StatusCode, ApiError> {
    if state.deps.authors.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(author_not_found(id))
    }
}
