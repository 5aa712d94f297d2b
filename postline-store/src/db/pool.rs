//! Database connection pool management
//!
//! Uses the sqlx `Any` driver so the same code runs against MySQL in
//! production and SQLite locally. Drivers are chosen by URL scheme.

use postline_core::DatabaseConfig;
use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;
use tracing::info;

use crate::error::{DbError, DbResult};

/// Create a connection pool from resolved configuration.
///
/// # Errors
///
/// Returns an error if the URL cannot be assembled or the first
/// connection fails.
///
/// # Example
///
/// ```ignore
/// let config = DatabaseConfig::from_env()?;
/// let pool = create_pool(&config).await?;
/// ```
pub async fn create_pool(config: &DatabaseConfig) -> DbResult<AnyPool> {
    sqlx::any::install_default_drivers();

    let url = config.url()?;
    info!(
        url = %config.redacted_url(),
        max_connections = config.max_connections,
        "Connecting to database"
    );

    AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&url)
        .await
        .map_err(DbError::Connect)
}
