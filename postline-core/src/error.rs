//! Error types for postline-core.

use thiserror::Error;

pub use crate::id::ParseIdentifierError;

/// Configuration could not be resolved.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// An environment value is present but does not parse
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    /// Only `tcp` and `unix` are understood
    #[error("unsupported connection method '{0}' (expected tcp or unix)")]
    UnsupportedConnMethod(String),

    #[error("could not assemble database url: {0}")]
    Url(#[from] url::ParseError),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    pub fn invalid_value(key: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidValue {
            key,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
