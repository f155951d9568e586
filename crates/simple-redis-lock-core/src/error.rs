//! Error types for lock operations.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during lock operations.
///
/// Failing to acquire a held lock is not an error: `lock` reports it as
/// `false` and `lock_with` as `None`.
#[derive(Error, Debug)]
pub enum LockError {
    /// The store could not be reached or rejected the command.
    #[error("connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Invalid lock name.
    #[error("invalid lock name: {0}")]
    InvalidName(String),

    /// The ttl truncates to zero milliseconds.
    #[error("invalid lock ttl {0:?}: must be at least 1ms")]
    InvalidTtl(Duration),

    /// The record under a lock key is not an acquisition timestamp.
    #[error("malformed lock record at {key}: {value:?}")]
    MalformedRecord {
        key: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl LockError {
    /// Wraps a store client failure.
    pub fn connection(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Connection(Box::new(err))
    }
}

/// Result type for lock operations.
pub type LockResult<T> = Result<T, LockError>;
