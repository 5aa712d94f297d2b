//! postline-core: identifiers, domain models and configuration
//!
//! Shared by the store layer and the CLI. Contains no I/O apart from
//! reading the environment in [`DatabaseConfig::from_env`].

pub mod config;
pub mod error;
pub mod id;
pub mod models;

pub use config::DatabaseConfig;
pub use error::{ConfigError, ConfigResult, ParseIdentifierError};
pub use id::Identifier;
pub use models::{Health, Post, PostWithUser, User, UserWithPosts};
