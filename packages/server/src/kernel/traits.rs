// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no authorization logic.
// The ownership guard and the HTTP handlers depend on these traits, never on
// sqlx directly, so tests can swap in the in-memory store.
//
// Naming convention: Base* for trait names (e.g., BaseAuthorStore)
//
// Lookups return Ok(None) for a missing row. Turning that into a not-found
// error is the caller's decision.

use anyhow::Result;
use async_trait::async_trait;

use crate::common::{AuthorId, CommentId, NewsId, Role};
use crate::domains::authors::Author;
use crate::domains::comments::Comment;
use crate::domains::news::{News, NewsChanges};

// =============================================================================
// Author store
// =============================================================================

#[async_trait]
pub trait BaseAuthorStore: Send + Sync {
    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>>;

    /// Username lookup used to resolve a caller's own author id
    async fn find_by_username(&self, username: &str) -> Result<Option<Author>>;

    /// Fails with `AuthorNameTaken` if the name is in use
    async fn create(&self, name: &str, password_hash: &str, roles: &[Role]) -> Result<Author>;

    /// Fails with `AuthorNameTaken` if another author has the name
    async fn update_name(&self, id: AuthorId, name: &str) -> Result<Option<Author>>;

    /// Returns false if the author did not exist
    async fn delete(&self, id: AuthorId) -> Result<bool>;
}

// =============================================================================
// News store
// =============================================================================

#[async_trait]
pub trait BaseNewsStore: Send + Sync {
    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>>;

    async fn create(&self, author_id: AuthorId, title: &str, news_text: &str) -> Result<News>;

    async fn update(&self, id: NewsId, changes: NewsChanges) -> Result<Option<News>>;

    async fn delete(&self, id: NewsId) -> Result<bool>;
}

// =============================================================================
// Comment store
// =============================================================================

#[async_trait]
pub trait BaseCommentStore: Send + Sync {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>>;

    async fn create(
        &self,
        news_id: NewsId,
        author_id: AuthorId,
        comment_text: &str,
    ) -> Result<Comment>;

    async fn update_text(&self, id: CommentId, comment_text: Option<String>)
        -> Result<Option<Comment>>;

    async fn delete(&self, id: CommentId) -> Result<bool>;
}
