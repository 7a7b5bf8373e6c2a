use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::common::{AuthorId, CommentId, NewsId};

/// Comment model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub news_id: NewsId,
    pub author_id: AuthorId,
    pub comment_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    /// Find comment by ID
    pub async fn find_by_id(id: CommentId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn create(
        news_id: NewsId,
        author_id: AuthorId,
        comment_text: &str,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO comments (news_id, author_id, comment_text)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(news_id)
        .bind(author_id)
        .bind(comment_text)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Replace comment text; `None` keeps the stored text
    pub async fn update_text(
        id: CommentId,
        comment_text: Option<&str>,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE comments
             SET comment_text = COALESCE($2, comment_text),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(comment_text)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: CommentId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
