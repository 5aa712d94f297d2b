//! Post commands
//!
//! Commands: post add, post list, post by-user

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use postline_core::Identifier;
use postline_store::Repository;

use super::print_json;

#[derive(Parser, Debug)]
pub struct PostArgs {
    #[command(subcommand)]
    pub command: PostCommand,
}

#[derive(Subcommand, Debug)]
pub enum PostCommand {
    /// Create a post for an existing user
    Add {
        /// Author's user identifier
        #[arg(long, short = 'u')]
        user: Identifier,
        /// Post title
        title: String,
        /// Post body
        body: String,
    },
    /// Latest posts across all users, with authors
    List {
        /// Maximum number of posts (0 or omitted: 10)
        #[arg(long, short = 'n', allow_negative_numbers = true)]
        limit: Option<i64>,
    },
    /// Latest posts by one user
    ByUser {
        /// User identifier
        id: Identifier,
        /// Maximum number of posts (0 or omitted: 10)
        #[arg(long, short = 'n', allow_negative_numbers = true)]
        limit: Option<i64>,
    },
}

pub async fn run_post(repo: &Repository, args: PostArgs) -> Result<()> {
    match args.command {
        PostCommand::Add { user, title, body } => {
            let post = repo
                .insert_post(&title, &body, user)
                .await
                .with_context(|| format!("failed to create post for user {user}"))?;
            print_json(&post)
        }
        PostCommand::List { limit } => {
            let posts = repo.list_posts(limit).await.context("failed to list posts")?;
            print_json(&posts)
        }
        PostCommand::ByUser { id, limit } => {
            let posts = repo
                .select_posts_by_user_id(id, limit)
                .await
                .with_context(|| format!("failed to list posts for user {id}"))?;
            print_json(&posts)
        }
    }
}
