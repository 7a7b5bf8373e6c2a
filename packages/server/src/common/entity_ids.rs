//! Typed ID definitions for all domain entities.
//!
//! ```rust
//! use news_core::common::{AuthorId, NewsId};
//!
//! let author_id = AuthorId::from_i64(5);
//! let news_id = NewsId::from_i64(5);
//!
//! // This would be a compile error:
//! // let wrong: NewsId = author_id;
//! # let _ = (author_id, news_id);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for Author entities (accounts that write news and comments).
pub struct Author;

/// Marker type for News entities.
pub struct News;

/// Marker type for Comment entities.
pub struct Comment;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for Author entities.
pub type AuthorId = Id<Author>;

/// Typed ID for News entities.
pub type NewsId = Id<News>;

/// Typed ID for Comment entities.
pub type CommentId = Id<Comment>;
