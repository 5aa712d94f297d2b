//! Statement composition and execution
//!
//! Every statement is built here as SQL text plus an ordered list of bind
//! values. User data only ever travels as a bind value; the one structural
//! piece rendered into the text is the `LIMIT` clause, and that only from a
//! resolved [`Limit`].

use std::future::Future;
use std::num::NonZeroU32;
use std::time::Duration;

use postline_core::Identifier;
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::Query;
use sqlx::{Any, AnyPool, FromRow};
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};

/// Rows returned when the caller gives no limit, or a non-positive one.
pub const DEFAULT_LIMIT: u32 = 10;

/// Upper bound on any rendered limit.
pub const MAX_LIMIT: u32 = 1000;

/// A validated row limit, always in `1..=MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Limit(NonZeroU32);

impl Limit {
    /// Resolve a caller-supplied limit.
    ///
    /// - absent, zero or negative → [`DEFAULT_LIMIT`]
    /// - above [`MAX_LIMIT`] → clamped
    pub fn resolve(requested: Option<i64>) -> Self {
        let n = match requested {
            Some(n) if n > 0 => n.min(MAX_LIMIT as i64) as u32,
            _ => DEFAULT_LIMIT,
        };
        // n is in 1..=MAX_LIMIT by construction
        Self(NonZeroU32::new(n).unwrap_or(NonZeroU32::MIN))
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::resolve(None)
    }
}

/// A parameterized statement ready to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    /// Operation name used in error and log context
    pub op: &'static str,
    pub sql: String,
    pub binds: Vec<String>,
}

impl Statement {
    pub fn new(op: &'static str, sql: impl Into<String>) -> Self {
        Self {
            op,
            sql: sql.into(),
            binds: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<String>) -> Self {
        self.binds.push(value.into());
        self
    }

    fn query(&self) -> Query<'_, Any, AnyArguments<'_>> {
        self.binds
            .iter()
            .fold(sqlx::query(&self.sql), |q, value| q.bind(value.as_str()))
    }

    /// Run a statement that returns no rows, yielding the affected row count.
    pub async fn execute(&self, pool: &AnyPool, timeout: Option<Duration>) -> DbResult<u64> {
        debug!(op = self.op, sql = %self.sql, binds = self.binds.len(), "executing statement");
        let done = self.bounded(timeout, self.query().execute(pool)).await?;
        Ok(done.rows_affected())
    }

    pub async fn fetch_all(&self, pool: &AnyPool, timeout: Option<Duration>) -> DbResult<Vec<AnyRow>> {
        debug!(op = self.op, sql = %self.sql, binds = self.binds.len(), "fetching rows");
        self.bounded(timeout, self.query().fetch_all(pool)).await
    }

    /// Fetch and decode every row into a typed row shape.
    pub async fn fetch_all_as<T>(&self, pool: &AnyPool, timeout: Option<Duration>) -> DbResult<Vec<T>>
    where
        T: for<'r> FromRow<'r, AnyRow>,
    {
        let rows = self.fetch_all(pool, timeout).await?;
        rows.iter()
            .map(|row| T::from_row(row).map_err(|e| DbError::execution(self.op, &self.sql, e)))
            .collect()
    }

    /// Await a driver future under the optional deadline, attaching this
    /// statement to whatever goes wrong.
    pub(crate) async fn bounded<T, F>(&self, timeout: Option<Duration>, fut: F) -> DbResult<T>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let outcome = match timeout {
            Some(limit) => match tokio::time::timeout(limit, fut).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    warn!(op = self.op, timeout = ?limit, "statement deadline exceeded");
                    return Err(DbError::DeadlineExceeded {
                        op: self.op,
                        statement: self.sql.clone(),
                        timeout: limit,
                    });
                }
            },
            None => fut.await,
        };
        outcome.map_err(|source| DbError::execution(self.op, &self.sql, source))
    }
}

pub fn insert_user(id: Identifier, name: &str) -> Statement {
    Statement::new("insert_user", "INSERT INTO users (id, name) VALUES (?, ?)")
        .bind(id)
        .bind(name)
}

pub fn insert_post(id: Identifier, title: &str, body: &str, user_id: Identifier) -> Statement {
    Statement::new(
        "insert_post",
        "INSERT INTO posts (id, title, body, user_id) VALUES (?, ?, ?, ?)",
    )
    .bind(id)
    .bind(title)
    .bind(body)
    .bind(user_id)
}

/// Posts by one author, newest first.
pub fn select_posts_by_user(user_id: Identifier, limit: Limit) -> Statement {
    let sql = format!(
        "SELECT posts.id AS id, posts.title AS title, posts.body AS body, posts.user_id AS user_id \
         FROM posts \
         WHERE posts.user_id = ? \
         ORDER BY posts.id DESC \
         LIMIT {}",
        limit.get()
    );
    Statement::new("select_posts_by_user_id", sql).bind(user_id)
}

/// Every post joined with its author, newest first.
pub fn list_posts_with_user(limit: Limit) -> Statement {
    let sql = format!(
        "SELECT P.id AS post_id, P.title AS post_title, P.body AS post_body, \
                U.id AS user_id, U.name AS user_name \
         FROM posts AS P \
         JOIN users AS U ON U.id = P.user_id \
         ORDER BY P.id DESC \
         LIMIT {}",
        limit.get()
    );
    Statement::new("list_posts", sql)
}

/// One user and all their posts, newest first.
///
/// LEFT JOIN so a user without posts still yields one row, with NULL post
/// columns.
pub fn user_with_posts(user_id: Identifier) -> Statement {
    Statement::new(
        "get_user_with_posts_by_id",
        "SELECT U.id AS user_id, U.name AS user_name, \
                P.id AS post_id, P.title AS post_title, P.body AS post_body, P.user_id AS post_user_id \
         FROM users AS U \
         LEFT JOIN posts AS P ON P.user_id = U.id \
         WHERE U.id = ? \
         ORDER BY P.id DESC",
    )
    .bind(user_id)
}

pub fn ping() -> Statement {
    Statement::new("health", "SELECT 1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_defaults() {
        assert_eq!(Limit::resolve(None).get(), 10);
        assert_eq!(Limit::resolve(Some(0)).get(), 10);
        assert_eq!(Limit::resolve(Some(-5)).get(), 10);
        assert_eq!(Limit::default().get(), DEFAULT_LIMIT);
    }

    #[test]
    fn limit_passes_through_and_clamps() {
        assert_eq!(Limit::resolve(Some(1)).get(), 1);
        assert_eq!(Limit::resolve(Some(37)).get(), 37);
        assert_eq!(Limit::resolve(Some(i64::MAX)).get(), MAX_LIMIT);
    }

    #[test]
    fn insert_user_binds_in_column_order() {
        let id = Identifier::generate();
        let stmt = insert_user(id, "alice");

        assert_eq!(stmt.sql, "INSERT INTO users (id, name) VALUES (?, ?)");
        assert_eq!(stmt.binds, vec![id.to_string(), "alice".to_string()]);
        assert_eq!(stmt.op, "insert_user");
    }

    #[test]
    fn insert_post_binds_in_column_order() {
        let id = Identifier::generate();
        let uid = Identifier::generate();
        let stmt = insert_post(id, "t", "b", uid);

        assert_eq!(stmt.sql.matches('?').count(), 4);
        assert_eq!(
            stmt.binds,
            vec![id.to_string(), "t".into(), "b".into(), uid.to_string()]
        );
    }

    #[test]
    fn user_data_never_reaches_sql_text() {
        let hostile = "x'); DROP TABLE users; --";
        let stmt = insert_post(Identifier::generate(), hostile, hostile, Identifier::generate());
        assert!(!stmt.sql.contains("DROP"));

        let stmt = insert_user(Identifier::generate(), hostile);
        assert!(!stmt.sql.contains("DROP"));
        assert_eq!(stmt.binds[1], hostile);
    }

    #[test]
    fn select_by_user_orders_and_limits() {
        let uid = Identifier::generate();
        let stmt = select_posts_by_user(uid, Limit::resolve(Some(3)));

        assert!(stmt.sql.contains("WHERE posts.user_id = ?"));
        assert!(stmt.sql.contains("ORDER BY posts.id DESC"));
        assert!(stmt.sql.ends_with("LIMIT 3"));
        assert_eq!(stmt.binds, vec![uid.to_string()]);
    }

    #[test]
    fn list_posts_zero_limit_uses_default() {
        let stmt = list_posts_with_user(Limit::resolve(Some(0)));
        assert!(stmt.sql.ends_with("LIMIT 10"));
        assert!(stmt.sql.contains("JOIN users AS U ON U.id = P.user_id"));
        assert!(stmt.binds.is_empty());
    }

    #[test]
    fn user_with_posts_is_left_join() {
        let uid = Identifier::generate();
        let stmt = user_with_posts(uid);

        assert!(stmt.sql.contains("LEFT JOIN posts AS P"));
        assert!(stmt.sql.contains("ORDER BY P.id DESC"));
        assert!(!stmt.sql.contains("LIMIT"));
        assert_eq!(stmt.binds, vec![uid.to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_turns_into_error() {
        let stmt = ping();
        let err = stmt
            .bounded(
                Some(Duration::from_millis(50)),
                std::future::pending::<Result<(), sqlx::Error>>(),
            )
            .await
            .unwrap_err();

        assert!(err.is_deadline_exceeded());
        assert!(err.to_string().contains("SELECT 1"));
    }

    #[tokio::test]
    async fn driver_error_is_wrapped_with_statement() {
        let stmt = ping();
        let err = stmt
            .bounded(None, async { Err::<(), _>(sqlx::Error::PoolClosed) })
            .await
            .unwrap_err();

        match err {
            DbError::Execution { op, statement, .. } => {
                assert_eq!(op, "health");
                assert_eq!(statement, "SELECT 1");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resolved_limit_in_range(requested in proptest::option::of(any::<i64>())) {
                let limit = Limit::resolve(requested).get();
                prop_assert!((1..=MAX_LIMIT).contains(&limit));
                match requested {
                    Some(n) if n > 0 && n <= MAX_LIMIT as i64 => prop_assert_eq!(limit as i64, n),
                    Some(n) if n > 0 => prop_assert_eq!(limit, MAX_LIMIT),
                    _ => prop_assert_eq!(limit, DEFAULT_LIMIT),
                }
            }
        }
    }
}
