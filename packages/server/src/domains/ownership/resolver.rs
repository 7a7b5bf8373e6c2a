//! Ownership resolver: who owns the targeted resource, and is it the caller.
//!
//! Nothing is cached; every guarded call re-reads ownership from the stores.

use std::sync::Arc;
use tracing::debug;

use super::{ResourceFamily, ResourceReference};
use crate::common::{AuthError, AuthorId, CommentId, NewsId, Principal};
use crate::kernel::{BaseAuthorStore, BaseCommentStore, BaseNewsStore, ServerDeps};

/// Result of comparing a resource's owner with the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnershipCheck {
    pub reference: ResourceReference,
    /// Author owning the resource (for authors: the author itself)
    pub owner_id: AuthorId,
    /// Author id bound to the caller's username
    pub caller_author_id: AuthorId,
}

impl OwnershipCheck {
    pub fn is_owner(&self) -> bool {
        self.owner_id == self.caller_author_id
    }
}

#[derive(Clone)]
pub struct OwnershipResolver {
    authors: Arc<dyn BaseAuthorStore>,
    news: Arc<dyn BaseNewsStore>,
    comments: Arc<dyn BaseCommentStore>,
}

impl OwnershipResolver {
    pub fn new(
        authors: Arc<dyn BaseAuthorStore>,
        news: Arc<dyn BaseNewsStore>,
        comments: Arc<dyn BaseCommentStore>,
    ) -> Self {
        Self {
            authors,
            news,
            comments,
        }
    }

    pub fn from_deps(deps: &ServerDeps) -> Self {
        Self::new(deps.authors.clone(), deps.news.clone(), deps.comments.clone())
    }

    /// Resolve the owner of `reference` and the caller's own author id.
    ///
    /// A missing resource or a caller without an author row yields
    /// `AuthError::NotFound`.
    pub async fn resolve(
        &self,
        principal: &Principal,
        reference: ResourceReference,
    ) -> Result<OwnershipCheck, AuthError> {
        let owner_id = match reference.family {
            ResourceFamily::Author => AuthorId::from_i64(reference.id),
            ResourceFamily::News => {
                let id = NewsId::from_i64(reference.id);
                self.news
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AuthError::NotFound(format!("News with ID {} not found", id)))?
                    .author_id
            }
            ResourceFamily::Comment => {
                let id = CommentId::from_i64(reference.id);
                self.comments
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| {
                        AuthError::NotFound(format!("Comment with ID {} not found", id))
                    })?
                    .author_id
            }
        };

        let caller_author_id = self.own_author_id(&principal.username).await?;

        debug!(
            family = %reference.family,
            target_id = reference.id,
            owner_id = %owner_id,
            caller_author_id = %caller_author_id,
            "Resolved ownership"
        );

        Ok(OwnershipCheck {
            reference,
            owner_id,
            caller_author_id,
        })
    }

    /// Author id bound to `username`
    pub async fn own_author_id(&self, username: &str) -> Result<AuthorId, AuthError> {
        self.authors
            .find_by_username(username)
            .await?
            .map(|author| author.id)
            .ok_or_else(|| AuthError::NotFound(format!("Author with name {} not found", username)))
    }
}
