//! User commands
//!
//! Commands: user add, user show

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postline_core::Identifier;
use postline_store::Repository;

use super::print_json;

#[derive(Parser, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Create a user and print it
    Add {
        /// Display name
        name: String,
    },
    /// Show a user with all of their posts, newest first
    Show {
        /// User identifier
        id: Identifier,
    },
}

pub async fn run_user(repo: &Repository, args: UserArgs) -> Result<()> {
    match args.command {
        UserCommand::Add { name } => {
            let user = repo
                .insert_user(&name)
                .await
                .context("failed to create user")?;
            print_json(&user)
        }
        UserCommand::Show { id } => {
            let user = repo
                .get_user_with_posts_by_id(id)
                .await
                .with_context(|| format!("failed to load user {id}"))?;
            print_json(&user)
        }
    }
}
