// Narrow read/write contract over the `profiles`, `friends` and
// `friendRequests` collections, plus its Postgres and in-memory backends.
pub mod friend_requests;
pub mod friends;
pub mod memory;
pub mod profiles;
pub mod queries;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("store is not connected")]
    NotConnected,
    #[error("store is unavailable: {0}")]
    Unavailable(String),
    #[error("invalid document: {0}")]
    InvalidDocument(String),
    #[error("conflicting document: {0}")]
    Conflict(String),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict(_))
    }
}

const UNIQUE_VIOLATION_CODE: &str = "23505";

/// Maps Postgres unique violations to `StoreError::Conflict`.
pub(crate) fn map_unique_violation(err: sqlx::Error, conflict_message: &str) -> StoreError {
    let is_unique_violation = match &err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .map_or(false, |code| code == UNIQUE_VIOLATION_CODE),
        _ => false,
    };

    if is_unique_violation {
        StoreError::Conflict(conflict_message.to_string())
    } else {
        StoreError::Database(err)
    }
}
