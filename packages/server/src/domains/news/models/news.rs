use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{AuthorId, NewsId};

/// News model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct News {
    pub id: NewsId,
    pub author_id: AuthorId,
    pub title: String,
    pub news_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct NewsChanges {
    pub title: Option<String>,
    pub news_text: Option<String>,
}

impl News {
    /// Find news by ID
    pub async fn find_by_id(id: NewsId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM news WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Publish news owned by `author_id`
    pub async fn create(
        author_id: AuthorId,
        title: &str,
        news_text: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO news (author_id, title, news_text)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(author_id)
        .bind(title)
        .bind(news_text)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Apply a partial update
    pub async fn update(id: NewsId, changes: &NewsChanges, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE news
             SET title = COALESCE($2, title),
                 news_text = COALESCE($3, news_text),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.news_text.as_deref())
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete news (comments cascade)
    pub async fn delete(id: NewsId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM news WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
