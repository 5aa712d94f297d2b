//! Command implementations for postline CLI

pub mod post;
pub mod system;
pub mod user;

use anyhow::Result;
use serde::Serialize;

pub use post::run_post;
pub use system::{run_health, run_migrate};
pub use user::run_user;

/// Pretty JSON on stdout.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
