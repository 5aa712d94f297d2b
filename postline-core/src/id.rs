//! Time-ordered primary keys.
//!
//! Every row gets an [`Identifier`] minted in-process before the insert is
//! issued; the store never generates keys. Identifiers are UUIDv7 values:
//! the creation time in Unix milliseconds occupies the top 48 bits and the
//! remainder is random, so later identifiers compare greater than earlier
//! ones both numerically and as canonical text.

use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Highest identifier handed out by this process so far.
///
/// Two calls within the same millisecond can draw random tails in either
/// order, so the generator bumps past the previous value when that happens.
static LAST_ISSUED: Mutex<u128> = Mutex::new(0);

/// Sortable, globally unique 128-bit key for users and posts.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(Uuid);

/// A stored value that does not parse back into an [`Identifier`].
#[derive(Debug, Error)]
#[error("malformed identifier '{value}': {source}")]
pub struct ParseIdentifierError {
    pub value: String,
    #[source]
    pub source: uuid::Error,
}

impl Identifier {
    /// Mint a new identifier.
    ///
    /// Strictly greater than every identifier previously returned by this
    /// process, including those minted concurrently on other threads.
    pub fn generate() -> Self {
        let candidate = Uuid::now_v7().as_u128();
        let mut last = LAST_ISSUED.lock().unwrap_or_else(PoisonError::into_inner);
        let next = if candidate > *last { candidate } else { *last + 1 };
        *last = next;
        Self(Uuid::from_u128(next))
    }

    /// Parse the canonical text form stored in the database.
    pub fn parse(value: &str) -> Result<Self, ParseIdentifierError> {
        Uuid::parse_str(value)
            .map(Self)
            .map_err(|source| ParseIdentifierError {
                value: value.to_owned(),
                source,
            })
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Creation time encoded in the high-order bits.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let millis = (self.0.as_u128() >> 80) as i64;
        DateTime::<Utc>::from_timestamp_millis(millis)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Lowercase hyphenated form; fixed width keeps text order == numeric order.
        write!(f, "{}", self.0.hyphenated())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({})", self.0.hyphenated())
    }
}

impl FromStr for Identifier {
    type Err = ParseIdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.to_string()
    }
}
