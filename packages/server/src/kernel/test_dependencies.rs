// InMemoryStore - map-backed store for tests and database-free local runs
//
// Implements all three Base*Store traits. Every find_* call is counted so
// tests can assert how many lookups a request performed. Fixture authors log
// in with DEFAULT_PASSWORD.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use super::{BaseAuthorStore, BaseCommentStore, BaseNewsStore};
use crate::common::{AuthorId, CommentId, NewsId, Role};
use crate::domains::auth::hash_password;
use crate::domains::authors::{Author, AuthorNameTaken};
use crate::domains::comments::Comment;
use crate::domains::news::{News, NewsChanges};

pub const DEFAULT_PASSWORD: &str = "password123";

/// Ids handed out by `create`, clear of any fixture id
const FIRST_GENERATED_ID: i64 = 1000;

pub struct InMemoryStore {
    authors: RwLock<HashMap<AuthorId, Author>>,
    news: RwLock<HashMap<NewsId, News>>,
    comments: RwLock<HashMap<CommentId, Comment>>,
    lookups: AtomicUsize,
    next_id: AtomicI64,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self {
            authors: RwLock::default(),
            news: RwLock::default(),
            comments: RwLock::default(),
            lookups: AtomicUsize::new(0),
            next_id: AtomicI64::new(FIRST_GENERATED_ID),
        }
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an author with the given id, name and roles
    pub fn with_author(self, id: i64, name: &str, roles: &[Role]) -> Self {
        let author = Author {
            id: AuthorId::from_i64(id),
            name: name.to_string(),
            password_hash: hash_password(DEFAULT_PASSWORD),
            roles: authorities(roles),
            created_at: Utc::now(),
        };
        self.authors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(author.id, author);
        self
    }

    /// Add a news item owned by `author_id`
    pub fn with_news(self, id: i64, author_id: i64, title: &str) -> Self {
        let now = Utc::now();
        let news = News {
            id: NewsId::from_i64(id),
            author_id: AuthorId::from_i64(author_id),
            title: title.to_string(),
            news_text: format!("{} body", title),
            created_at: now,
            updated_at: now,
        };
        self.news
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(news.id, news);
        self
    }

    /// Add a comment on `news_id` owned by `author_id`
    pub fn with_comment(self, id: i64, news_id: i64, author_id: i64, text: &str) -> Self {
        let now = Utc::now();
        let comment = Comment {
            id: CommentId::from_i64(id),
            news_id: NewsId::from_i64(news_id),
            author_id: AuthorId::from_i64(author_id),
            comment_text: text.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.comments
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(comment.id, comment);
        self
    }

    /// Reassign a news item to another author
    pub fn transfer_news(&self, id: i64, author_id: i64) {
        if let Some(news) = self
            .news
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&NewsId::from_i64(id))
        {
            news.author_id = AuthorId::from_i64(author_id);
        }
    }

    /// Replace the stored roles of an author
    pub fn set_roles(&self, id: i64, roles: &[Role]) {
        if let Some(author) = self
            .authors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&AuthorId::from_i64(id))
        {
            author.roles = authorities(roles);
        }
    }

    /// Number of find_* calls served so far
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn news_title(&self, id: i64) -> Option<String> {
        self.news
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&NewsId::from_i64(id))
            .map(|n| n.title.clone())
    }

    pub fn has_comment(&self, id: i64) -> bool {
        self.comments
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&CommentId::from_i64(id))
    }

    pub fn author_id_by_name(&self, name: &str) -> Option<AuthorId> {
        self.authors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .find(|a| a.name == name)
            .map(|a| a.id)
    }

    pub fn has_author(&self, id: i64) -> bool {
        self.authors
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&AuthorId::from_i64(id))
    }

    fn record_lookup(&self) {
        self.lookups.fetch_add(1, Ordering::SeqCst);
    }

    fn generate_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }
}

fn authorities(roles: &[Role]) -> Vec<String> {
    roles.iter().map(|r| r.as_authority().to_string()).collect()
}

/// Mirror the UNIQUE constraint on authors.name
fn ensure_name_free(
    authors: &HashMap<AuthorId, Author>,
    name: &str,
    except: Option<AuthorId>,
) -> Result<()> {
    if authors
        .values()
        .any(|a| a.name == name && Some(a.id) != except)
    {
        return Err(AuthorNameTaken(name.to_string()).into());
    }
    Ok(())
}

#[async_trait]
impl BaseAuthorStore for InMemoryStore {
    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>> {
        self.record_lookup();
        let authors = self.authors.read().unwrap_or_else(PoisonError::into_inner);
        Ok(authors.get(&id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Author>> {
        self.record_lookup();
        let authors = self.authors.read().unwrap_or_else(PoisonError::into_inner);
        Ok(authors.values().find(|a| a.name == username).cloned())
    }

    async fn create(&self, name: &str, password_hash: &str, roles: &[Role]) -> Result<Author> {
        let mut authors = self.authors.write().unwrap_or_else(PoisonError::into_inner);
        ensure_name_free(&authors, name, None)?;

        let author = Author {
            id: AuthorId::from_i64(self.generate_id()),
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            roles: authorities(roles),
            created_at: Utc::now(),
        };
        authors.insert(author.id, author.clone());
        Ok(author)
    }

    async fn update_name(&self, id: AuthorId, name: &str) -> Result<Option<Author>> {
        let mut authors = self.authors.write().unwrap_or_else(PoisonError::into_inner);
        ensure_name_free(&authors, name, Some(id))?;
        Ok(authors.get_mut(&id).map(|author| {
            author.name = name.to_string();
            author.clone()
        }))
    }

    async fn delete(&self, id: AuthorId) -> Result<bool> {
        let removed = self
            .authors
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            // Mirror ON DELETE CASCADE
            self.news
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|_, n| n.author_id != id);
            self.comments
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|_, c| c.author_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl BaseNewsStore for InMemoryStore {
    async fn find_by_id(&self, id: NewsId) -> Result<Option<News>> {
        self.record_lookup();
        let news = self.news.read().unwrap_or_else(PoisonError::into_inner);
        Ok(news.get(&id).cloned())
    }

    async fn create(&self, author_id: AuthorId, title: &str, news_text: &str) -> Result<News> {
        let now = Utc::now();
        let news = News {
            id: NewsId::from_i64(self.generate_id()),
            author_id,
            title: title.to_string(),
            news_text: news_text.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.news
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(news.id, news.clone());
        Ok(news)
    }

    async fn update(&self, id: NewsId, changes: NewsChanges) -> Result<Option<News>> {
        let mut news = self.news.write().unwrap_or_else(PoisonError::into_inner);
        Ok(news.get_mut(&id).map(|item| {
            if let Some(title) = changes.title {
                item.title = title;
            }
            if let Some(text) = changes.news_text {
                item.news_text = text;
            }
            item.updated_at = Utc::now();
            item.clone()
        }))
    }

    async fn delete(&self, id: NewsId) -> Result<bool> {
        let removed = self
            .news
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some();
        if removed {
            self.comments
                .write()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|_, c| c.news_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl BaseCommentStore for InMemoryStore {
    async fn find_by_id(&self, id: CommentId) -> Result<Option<Comment>> {
        self.record_lookup();
        let comments = self.comments.read().unwrap_or_else(PoisonError::into_inner);
        Ok(comments.get(&id).cloned())
    }

    async fn create(
        &self,
        news_id: NewsId,
        author_id: AuthorId,
        comment_text: &str,
    ) -> Result<Comment> {
        let now = Utc::now();
        let comment = Comment {
            id: CommentId::from_i64(self.generate_id()),
            news_id,
            author_id,
            comment_text: comment_text.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.comments
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update_text(
        &self,
        id: CommentId,
        comment_text: Option<String>,
    ) -> Result<Option<Comment>> {
        let mut comments = self.comments.write().unwrap_or_else(PoisonError::into_inner);
        Ok(comments.get_mut(&id).map(|comment| {
            if let Some(text) = comment_text {
                comment.comment_text = text;
            }
            comment.updated_at = Utc::now();
            comment.clone()
        }))
    }

    async fn delete(&self, id: CommentId) -> Result<bool> {
        Ok(self
            .comments
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id)
            .is_some())
    }
}
