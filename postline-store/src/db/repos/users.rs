//! User repository
//!
//! - insert: identifier minted in-process, single-row INSERT
//! - get with posts: one LEFT JOIN, folded into a `UserWithPosts`

use std::time::Duration;

use postline_core::{Identifier, User, UserWithPosts};
use sqlx::AnyPool;
use tracing::instrument;

use crate::db::mapper::{self, UserPostRow};
use crate::db::query;
use crate::error::DbResult;

/// User repository
pub struct UserRepo<'a> {
    pool: &'a AnyPool,
    timeout: Option<Duration>,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a AnyPool, timeout: Option<Duration>) -> Self {
        Self { pool, timeout }
    }

    /// Create a user under a freshly generated identifier.
    #[instrument(skip(self), fields(user_id = tracing::field::Empty))]
    pub async fn insert(&self, name: &str) -> DbResult<User> {
        let id = Identifier::generate();
        tracing::Span::current().record("user_id", tracing::field::display(id));

        query::insert_user(id, name)
            .execute(self.pool, self.timeout)
            .await?;

        Ok(User::new(id, name))
    }

    /// Load a user and every post they wrote, newest first.
    ///
    /// Fails with `NotFound` when the user does not exist; a user with no
    /// posts comes back with an empty `posts`.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_with_posts(&self, user_id: Identifier) -> DbResult<UserWithPosts> {
        let rows: Vec<UserPostRow> = query::user_with_posts(user_id)
            .fetch_all_as(self.pool, self.timeout)
            .await?;

        mapper::fold_user_with_posts(user_id, rows)
    }
}
