//! Schema and connectivity commands
//!
//! Commands: migrate, health

use anyhow::{Context, Result};
use postline_store::{migrations, Repository};
use serde_json::json;
use tracing::info;

use super::print_json;

pub async fn run_migrate(repo: &Repository) -> Result<()> {
    migrations::run(repo.pool())
        .await
        .context("failed to create schema")?;
    info!("schema is up to date");
    print_json(&json!({ "migrated": true }))
}

/// Prints the health report; exits non-zero when the store is unreachable.
pub async fn run_health(repo: &Repository) -> Result<()> {
    // No HTTP server in this binary; report it as not started.
    let health = repo.health(false).await;
    print_json(&health)?;

    if !health.mysql_connected {
        anyhow::bail!("database is unreachable");
    }
    Ok(())
}
