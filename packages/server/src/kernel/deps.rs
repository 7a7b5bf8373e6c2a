//! Server dependencies (using traits for testability)
//!
//! This module provides the central dependency container shared by the
//! ownership guard and the HTTP handlers. All persistence goes through the
//! store traits so tests can run against `InMemoryStore`.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::common::{AuthorId, CommentId, NewsId, Role};
use crate::domains::auth::JwtService;
use crate::domains::authors::Author;
use crate::domains::comments::Comment;
use crate::domains::news::{News, NewsChanges};
use crate::kernel::{BaseAuthorStore, BaseCommentStore, BaseNewsStore};

// =============================================================================
// Postgres adapter (implements the Base*Store traits)
// =============================================================================

/// Wrapper around PgPool that implements the store traits via the sqlx models
#[derive(Clone)]
pub struct PgStore(pub PgPool);

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self(pool)
    }
}

#[async_trait]
impl BaseAuthorStore for PgStore {
    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>> {
        Author::find_by_id(id, &self.0).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Author>> {
        Author::find_by_name(username, &self.0).await
    }

    async fn create(&self, name: &str, password_hash: &str, roles: &[Role]) -> Result<Author> {
        Author::create(name, password_hash, roles, &self.0).await
    }

    async fn update_name(&self, id: AuthorId, name: &str) -> Result<Option<Author>> {
        Author::update_name(id, name, &self.0).await
    }

    async fn delete(&self, id: AuthorId) -> Result<bool> {
        Author::delete(id, &self.0).await
    }
}

#[async_trait]
impl BaseNewsStore for PgStore {
    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>> {
        News::find_by_id(id, &self.0).await
    }

    async fn create(&self, author_id: AuthorId, title: &str, news_text: &str) -> Result<News> {
        News::create(author_id, title, news_text, &self.0).await
    }

    async fn update(&self, id: NewsId, changes: NewsChanges) -> Result<Option<News>> {
        News::update(id, &changes, &self.0).await
    }

    async fn delete(&self, id: NewsId) -> Result<bool> {
        News::delete(id, &self.0).await
    }
}

#[async_trait]
impl BaseCommentStore for PgStore {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
        Comment::find_by_id(id, &self.0).await
    }

    async fn create(
        &self,
        news_id: NewsId,
        author_id: AuthorId,
        comment_text: &str,
    ) -> Result<Comment> {
        Comment::create(news_id, author_id, comment_text, &self.0).await
    }

    async fn update_text(
        &self,
        id: CommentId,
        comment_text: Option<String>,
    ) -> Result<Option<Comment>> {
        Comment::update_text(id, comment_text.as_deref(), &self.0).await
    }

    async fn delete(&self, id: CommentId) -> Result<bool> {
        Comment::delete(id, &self.0).await
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to middleware and handlers
#[derive(Clone)]
pub struct ServerDeps {
    /// Present when running against Postgres; used by the health check
    pub db_pool: Option<PgPool>,
    pub authors: Arc<dyn BaseAuthorStore>,
    pub news: Arc<dyn BaseNewsStore>,
    pub comments: Arc<dyn BaseCommentStore>,
    /// JWT service for token verification
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    /// Create new ServerDeps with the given dependencies
    pub fn new(
        authors: Arc<dyn BaseAuthorStore>,
        news: Arc<dyn BaseNewsStore>,
        comments: Arc<dyn BaseCommentStore>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            db_pool: None,
            authors,
            news,
            comments,
            jwt_service,
        }
    }

    /// All three stores backed by one Postgres pool
    pub fn postgres(pool: PgPool, jwt_service: Arc<JwtService>) -> Self {
        let store = Arc::new(PgStore::new(pool.clone()));
        Self {
            db_pool: Some(pool),
            authors: store.clone(),
            news: store.clone(),
            comments: store,
            jwt_service,
        }
    }
}
