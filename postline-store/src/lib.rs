//! postline-store: relational mapping for users and posts
//!
//! Builds parameterized statements, runs them against an injected sqlx
//! pool, and folds flat or joined rows into the aggregates defined in
//! `postline-core`.

pub mod db;
pub mod error;

pub use db::{create_pool, migrations, Limit, Repository};
pub use error::{DbError, DbResult};
