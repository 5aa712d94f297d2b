//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Identifiers minted in-process, never by the store
//! - One statement per operation, no retries
//! - Referential checks left to the store's constraints (no check-then-insert)

pub mod posts;
pub mod users;

use std::time::Duration;

use postline_core::{DatabaseConfig, Health, Identifier, Post, PostWithUser, User, UserWithPosts};
use sqlx::AnyPool;
use tracing::warn;

pub use posts::PostRepo;
pub use users::UserRepo;

use super::{pool, query};
use crate::error::DbResult;

/// Public data-access surface for users and posts.
///
/// Owns the pool handle; each call borrows it for a single statement and
/// returns freshly built values.
#[derive(Clone)]
pub struct Repository {
    pool: AnyPool,
    statement_timeout: Option<Duration>,
}

impl Repository {
    pub fn new(pool: AnyPool, config: &DatabaseConfig) -> Self {
        Self {
            pool,
            statement_timeout: config.statement_timeout,
        }
    }

    /// Build the pool from `config` and wrap it.
    pub async fn connect(config: &DatabaseConfig) -> DbResult<Self> {
        let pool = pool::create_pool(config).await?;
        Ok(Self::new(pool, config))
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    pub fn users(&self) -> UserRepo<'_> {
        UserRepo::new(&self.pool, self.statement_timeout)
    }

    pub fn posts(&self) -> PostRepo<'_> {
        PostRepo::new(&self.pool, self.statement_timeout)
    }

    pub async fn insert_user(&self, name: &str) -> DbResult<User> {
        self.users().insert(name).await
    }

    pub async fn insert_post(&self, title: &str, body: &str, user_id: Identifier) -> DbResult<Post> {
        self.posts().insert(title, body, user_id).await
    }

    /// `limit` of `None` or `<= 0` means 10.
    pub async fn select_posts_by_user_id(
        &self,
        user_id: Identifier,
        limit: Option<i64>,
    ) -> DbResult<Vec<Post>> {
        self.posts().select_by_user(user_id, limit).await
    }

    /// `limit` of `None` or `<= 0` means 10.
    pub async fn list_posts(&self, limit: Option<i64>) -> DbResult<Vec<PostWithUser>> {
        self.posts().list_with_user(limit).await
    }

    pub async fn get_user_with_posts_by_id(&self, user_id: Identifier) -> DbResult<UserWithPosts> {
        self.users().get_with_posts(user_id).await
    }

    /// Check the store. Never fails; an unreachable store reports
    /// `mysql_connected: false`.
    pub async fn health(&self, api_server_started: bool) -> Health {
        let mysql_connected = match query::ping().execute(&self.pool, self.statement_timeout).await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "database health check failed");
                false
            }
        };

        Health {
            mysql_connected,
            api_server_started,
        }
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
