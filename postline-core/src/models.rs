//! Domain models handed to callers.
//!
//! These are plain owned values; every read builds fresh instances and
//! nothing here talks to the store.

use serde::{Deserialize, Serialize};

use crate::id::Identifier;

/// A registered author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Identifier,
    pub name: String,
}

/// A post, referencing its author by id only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Identifier,
    pub title: String,
    pub body: String,
    pub user_id: Identifier,
}

/// A user together with their posts, newest first.
///
/// `posts` is empty, never absent, for a user who has not posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserWithPosts {
    pub id: Identifier,
    pub name: String,
    #[serde(default)]
    pub posts: Vec<Post>,
}

/// A post with its author embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithUser {
    pub id: Identifier,
    pub title: String,
    pub body: String,
    pub user: User,
}

/// Liveness report for the service layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    pub mysql_connected: bool,
    pub api_server_started: bool,
}

impl User {
    pub fn new(id: Identifier, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

impl Post {
    pub fn new(
        id: Identifier,
        title: impl Into<String>,
        body: impl Into<String>,
        user_id: Identifier,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            body: body.into(),
            user_id,
        }
    }
}

impl UserWithPosts {
    /// The user part of the aggregate, without posts.
    pub fn user(&self) -> User {
        User::new(self.id, self.name.clone())
    }
}

impl Health {
    pub fn is_healthy(&self) -> bool {
        self.mysql_connected && self.api_server_started
    }
}
