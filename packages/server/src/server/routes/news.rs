use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::{AuthorId, NewsId, Principal};
use crate::domains::news::{News, NewsChanges};
use crate::server::app::AppState;
use crate::server::errors::ApiError;
use crate::server::routes::auth::authenticated;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub id: NewsId,
    pub author_id: AuthorId,
    pub title: String,
    pub news_text: String,
    pub updated_at: DateTime<Utc>,
}

impl From<News> for NewsResponse {
    fn from(news: News) -> Self {
        Self {
            id: news.id,
            author_id: news.author_id,
            title: news.title,
            news_text: news.news_text,
            updated_at: news.updated_at,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsRequest {
    pub title: String,
    pub news_text: String,
}

/// Partial update; omitted or null fields keep their stored value
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNewsRequest {
    pub title: Option<String>,
    pub news_text: Option<String>,
}

fn news_not_found(id: NewsId) -> ApiError {
    ApiError::NotFound(format!("News with ID {} not found", id))
}

/// Author row behind the authenticated caller
pub(crate) async fn caller_id(state: &AppState, principal: &Principal) -> Result<AuthorId, ApiError> {
    state
        .deps
        .authors
        .find_by_username(&principal.username)
        .await?
        .map(|author| author.id)
        .ok_or_else(|| {
            ApiError::NotFound(format!("Author with name {} not found", principal.username))
        })
}

/// POST /api/v1/news
pub async fn create_news(
    Extension(state): Extension<AppState>,
    principal: Option<Extension<Principal>>,
    Json(request): Json<CreateNewsRequest>,
) -> Result<(StatusCode, Json<NewsResponse>), ApiError> {
    let principal = authenticated(principal)?;
    if request.title.trim().is_empty() {
        return Err(ApiError::BadRequest("News title must not be blank".to_string()));
    }

    let author_id = caller_id(&state, &principal).await?;
    let news = state
        .deps
        .news
        .create(author_id, request.title.trim(), &request.news_text)
        .await?;

    Ok((StatusCode::CREATED, Json(news.into())))
}

/// GET /api/v1/news/:id
pub async fn find_news(
    Extension(state): Extension<AppState>,
    principal: Option<Extension<Principal>>,
    Path(id): Path<NewsId>,
) -> Result<Json<NewsResponse>, ApiError> {
    authenticated(principal)?;

    let news = state
        .deps
        .news
        .find_by_id(id)
        .await?
        .ok_or_else(|| news_not_found(id))?;

    Ok(Json(news.into()))
}

/// PUT /api/v1/news/:id
pub async fn update_news(
    Extension(state): Extension<AppState>,
    Path(id): Path<NewsId>,
    Json(request): Json<UpdateNewsRequest>,
) -> Result<Json<NewsResponse>, ApiError> {
    let changes = NewsChanges {
        title: request.title,
        news_text: request.news_text,
    };

    let news = state
        .deps
        .news
        .update(id, changes)
        .await?
        .ok_or_else(|| news_not_found(id))?;

    Ok(Json(news.into()))
}

/// DELETE /api/v1/news/:id
pub async fn delete_news(
    Extension(state): Extension<AppState>,
    Path(id): Path<NewsId>,
) -> Result<StatusCode, ApiError> {
    if state.deps.news.delete(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(news_not_found(id))
    }
}
