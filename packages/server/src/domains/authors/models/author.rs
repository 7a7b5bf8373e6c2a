use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;

use crate::common::{AuthorId, Role};

/// Author model - SQL persistence layer
///
/// `name` doubles as the login username and is unique.
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub password_hash: String,
    pub roles: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Another author already uses this name
#[derive(Error, Debug)]
#[error("Author with name {0} already exists")]
pub struct AuthorNameTaken(pub String);

impl Author {
    /// Parsed roles; unknown role strings are skipped
    pub fn role_set(&self) -> Vec<Role> {
        self.roles
            .iter()
            .filter_map(|raw| match raw.parse::<Role>() {
                Ok(role) => Some(role),
                Err(e) => {
                    tracing::warn!(author_id = %self.id, error = %e, "Ignoring unknown role");
                    None
                }
            })
            .collect()
    }

    /// Find author by ID
    pub async fn find_by_id(id: AuthorId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Find author by name (the username a caller authenticates with)
    pub async fn find_by_name(name: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM authors WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Create an account
    ///
    /// Fails with `AuthorNameTaken` if the name is in use
    pub async fn create(
        name: &str,
        password_hash: &str,
        roles: &[Role],
        pool: &PgPool,
    ) -> Result<Self> {
        let roles: Vec<String> = roles.iter().map(|r| r.as_authority().to_string()).collect();

        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO authors (name, password_hash, roles)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(password_hash)
        .bind(roles)
        .fetch_one(pool)
        .await
        .map_err(|e| name_conflict(e, name))
    }

    /// Rename author
    ///
    /// Fails with `AuthorNameTaken` if another author has the name
    pub async fn update_name(id: AuthorId, name: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("UPDATE authors SET name = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
            .map_err(|e| name_conflict(e, name))
    }

    /// Delete author (news and comments cascade)
    ///
    /// Returns false if no row matched
    pub async fn delete(id: AuthorId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn name_conflict(e: sqlx::Error, name: &str) -> anyhow::Error {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AuthorNameTaken(name.to_string()).into()
        }
        _ => e.into(),
    }
}
