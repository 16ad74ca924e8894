//! Storage error taxonomy.
//!
//! Absence is never an error here: lookups return `Option` and deletions
//! return whether a row was removed. What remains is the split between
//! uniqueness conflicts, which callers map to a user-facing "already exists"
//! outcome, and everything else from SQLite, which is infrastructure failure.

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint rejected the write: duplicate email, or the
    /// losing side of a concurrent idempotency-key insert.
    #[error("unique constraint violated: {0}")]
    Conflict(String),

    /// Any other database failure. Not retried.
    #[error("database error: {0}")]
    Db(#[source] rusqlite::Error),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, _) if failure.code == ErrorCode::ConstraintViolation => {
                StoreError::Conflict(err.to_string())
            }
            _ => StoreError::Db(err),
        }
    }
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}
