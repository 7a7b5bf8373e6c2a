//! Test fixtures for creating test data.
//!
//! Authors:  root (2, ADMIN), alice (5, USER), bob (7, USER),
//!           mod (8, MODERATOR), carol (9, USER)
//! News:     3 by bob, 6 by alice
//! Comments: 4 by alice on news 3, 10 by bob on news 6

use news_core::common::Role;
use news_core::kernel::InMemoryStore;

pub const ADMIN: &[Role] = &[Role::Admin];
pub const MODERATOR: &[Role] = &[Role::Moderator];
pub const USER: &[Role] = &[Role::User];

pub fn newsroom() -> InMemoryStore {
    InMemoryStore::new()
        .with_author(2, "root", ADMIN)
        .with_author(5, "alice", USER)
        .with_author(7, "bob", USER)
        .with_author(8, "mod", MODERATOR)
        .with_author(9, "carol", USER)
        .with_news(3, 7, "City budget approved")
        .with_news(6, 5, "Library reopens")
        .with_comment(4, 3, 5, "Finally!")
        .with_comment(10, 6, 7, "Great news")
}
