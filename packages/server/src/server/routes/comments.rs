use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::{AuthorId, CommentId, NewsId, Principal};
use crate::domains::comments::Comment;
use crate::server::app::AppState;
use crate::server::errors::ApiError;
use crate::server::routes::auth::authenticated;
use crate::server::routes::news::caller_id;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: CommentId,
    pub news_id: NewsId,
    pub author_id: AuthorId,
    pub comment_text: String,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            news_id: comment.news_id,
            author_id: comment.author_id,
            comment_text: comment.comment_text,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub news_id: NewsId,
    pub comment_text: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub comment_text: Option<String>,
}

fn comment_not_found(id: CommentId) -> ApiError {
    ApiError::NotFound(format!("Comment with ID {} not found", id))
}

/// POST /api/v1/comment
pub async fn create_comment(
    Extension(state): Extension<AppState>,
    principal: Option<Extension<Principal>>,
    Json(request): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), ApiError> {
    let principal = authenticated(principal)?;
    if request.comment_text.trim().is_empty() {
        return Err(ApiError::BadRequest("Comment text must not be blank".to_string()));
    }

    if state.deps.news.find_by_id(request.news_id).await?.is_none() {
        return Err(ApiError::NotFound(format!(
            "News with ID {} not found",
            request.news_id
        )));
    }

    let author_id = caller_id(&state, &principal).await?;
    let comment = state
        .deps
        .comments
        .create(request.news_id, author_id, &request.comment_text)
        .await?;

    Ok((StatusCode::CREATED, Json(comment.into())))
}

/// GET /api/v1/comment/:id
pub async fn find_comment(
    Extension(state): Extension<AppState>,
    principal: Option<Extension<Principal>>,
    Path(id): Path<CommentId>,
) -> Result<Json<CommentResponse>, ApiError> {
    authenticated(principal)?;

    let comment = state
        .deps
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    Ok(Json(comment.into()))
}

/// PUT /api/v1/comment/:id
pub async fn update_comment(
    Extension(state): Extension<AppState>,
    Path(id): Path<CommentId>,
    Json(request): Json<UpdateCommentRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let comment = state
        .deps
        .comments
        .update_text(id, request.comment_text)
        .await?
        .ok_or_else(|| comment_not_found(id))?;

    Ok(Json(comment.into()))
}

/// DELETE /api/v1/comment/:id
pub async fn delete_comment(
    Extension(state): Extension<AppState>,
    Path(id): Path<CommentId>,
) -> Result<StatusCode, ApiError> {
    if state.deps.comments.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(comment_not_found(id))
    }
}
