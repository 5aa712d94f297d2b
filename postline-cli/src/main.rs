//! postline CLI - users and posts in a relational store
//!
//! Resolves database configuration once from the environment (and `.env`),
//! opens a pool, and runs one repository operation per invocation. Results
//! are printed as JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postline_core::DatabaseConfig;
use postline_store::Repository;
use tracing::debug;

mod commands;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "postline",
    author,
    version,
    about = "Create and query users and their posts",
    long_about = "Create and query users and their posts. Connection settings come from \
                  DATABASE_* environment variables (see DATABASE_URL to target SQLite)."
)]
struct Cli {
    /// Enable debug logging (statement text, spans)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create the users and posts tables if missing
    Migrate,
    /// Check database connectivity
    Health,
    /// User operations (add, show)
    User(commands::user::UserArgs),
    /// Post operations (add, list, by-user)
    Post(commands::post::PostArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(err) = tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let config = DatabaseConfig::from_env().context("invalid database configuration")?;
    debug!(url = %config.redacted_url(), "resolved database configuration");

    let repo = Repository::connect(&config)
        .await
        .with_context(|| format!("failed to connect to {}", config.redacted_url()))?;

    let outcome = match cli.command {
        Commands::Migrate => commands::run_migrate(&repo).await,
        Commands::Health => commands::run_health(&repo).await,
        Commands::User(args) => commands::run_user(&repo, args).await,
        Commands::Post(args) => commands::run_post(&repo, args).await,
    };

    repo.close().await;
    outcome
}
