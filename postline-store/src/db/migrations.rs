//! Schema bootstrap for the users and posts tables
//!
//! DDL sticks to the subset MySQL and SQLite share, so the same statements
//! serve production and local databases. Safe to run repeatedly.

use sqlx::AnyPool;

use super::query::Statement;
use crate::error::DbResult;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id VARCHAR(36) NOT NULL PRIMARY KEY,
    name TEXT NOT NULL
)
"#;

const CREATE_POSTS: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id VARCHAR(36) NOT NULL PRIMARY KEY,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    user_id VARCHAR(36) NOT NULL,
    FOREIGN KEY (user_id) REFERENCES users (id)
)
"#;

/// Create any missing tables.
pub async fn run(pool: &AnyPool) -> DbResult<()> {
    tracing::info!("Running schema migrations...");

    Statement::new("migrate.users", CREATE_USERS)
        .execute(pool, None)
        .await?;
    Statement::new("migrate.posts", CREATE_POSTS)
        .execute(pool, None)
        .await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}
