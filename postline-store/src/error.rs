//! Error types for postline-store

use std::time::Duration;

use postline_core::{ConfigError, ParseIdentifierError};
use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Database error type
#[derive(Debug, Error)]
pub enum DbError {
    /// The store rejected or failed to run a statement
    #[error("{op}: failed to {statement}: {source}")]
    Execution {
        op: &'static str,
        statement: String,
        #[source]
        source: sqlx::Error,
    },

    /// An aggregate read expected at least one row and got none
    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// A stored key does not parse back into an identifier
    #[error("malformed identifier in column {column}: {source}")]
    MalformedIdentifier {
        column: &'static str,
        #[source]
        source: ParseIdentifierError,
    },

    #[error("{op}: deadline of {timeout:?} exceeded while running {statement}")]
    DeadlineExceeded {
        op: &'static str,
        statement: String,
        timeout: Duration,
    },

    #[error("could not connect to database: {0}")]
    Connect(#[source] sqlx::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DbError {
    pub fn execution(op: &'static str, statement: impl Into<String>, source: sqlx::Error) -> Self {
        Self::Execution {
            op,
            statement: statement.into(),
            source,
        }
    }

    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_deadline_exceeded(&self) -> bool {
        matches!(self, Self::DeadlineExceeded { .. })
    }
}
