//! Post repository
//!
//! Reads are newest-first and always limited; see [`Limit`] for the
//! default and bounds.

use std::time::Duration;

use postline_core::{Identifier, Post, PostWithUser};
use sqlx::AnyPool;
use tracing::instrument;

use crate::db::mapper::{self, PostRow, PostWithUserRow};
use crate::db::query::{self, Limit};
use crate::error::DbResult;

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a AnyPool,
    timeout: Option<Duration>,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a AnyPool, timeout: Option<Duration>) -> Self {
        Self { pool, timeout }
    }

    /// Create a post for `user_id`.
    ///
    /// The author must already exist; that is checked by the store's
    /// foreign key, not here.
    #[instrument(skip(self, body), fields(user_id = %user_id, post_id = tracing::field::Empty))]
    pub async fn insert(&self, title: &str, body: &str, user_id: Identifier) -> DbResult<Post> {
        let id = Identifier::generate();
        tracing::Span::current().record("post_id", tracing::field::display(id));

        query::insert_post(id, title, body, user_id)
            .execute(self.pool, self.timeout)
            .await?;

        Ok(Post::new(id, title, body, user_id))
    }

    /// Posts written by one user, newest first, at most `limit`.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn select_by_user(&self, user_id: Identifier, limit: Option<i64>) -> DbResult<Vec<Post>> {
        let rows: Vec<PostRow> = query::select_posts_by_user(user_id, Limit::resolve(limit))
            .fetch_all_as(self.pool, self.timeout)
            .await?;

        mapper::map_posts(rows)
    }

    /// Latest posts across all users, each with its author.
    #[instrument(skip(self))]
    pub async fn list_with_user(&self, limit: Option<i64>) -> DbResult<Vec<PostWithUser>> {
        let rows: Vec<PostWithUserRow> = query::list_posts_with_user(Limit::resolve(limit))
            .fetch_all_as(self.pool, self.timeout)
            .await?;

        mapper::map_posts_with_user(rows)
    }
}
