//! Database layer - connection pool, statements, row mapping and repositories
//!
//! # Design Principles
//!
//! - Every statement is parameterized; only a resolved `Limit` is rendered
//! - Each statement declares its row shape; mapping is typed, not by reflection
//! - Errors carry the operation name and the statement that was attempted

pub mod mapper;
pub mod migrations;
pub mod pool;
pub mod query;
pub mod repos;

pub use pool::create_pool;
pub use query::{Limit, Statement, DEFAULT_LIMIT, MAX_LIMIT};
pub use repos::{PostRepo, Repository, UserRepo};
