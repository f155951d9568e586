//! Mapping of Redis client errors onto lock errors.

use fred::error::{RedisError, RedisErrorKind};
use simple_redis_lock_core::error::LockError;

/// Converts a client error into a [`LockError`].
///
/// Failures to reach the server become `Connection`; replies the server sent
/// back (rejected commands, unexpected types) become `Backend`.
pub fn lock_error(err: RedisError) -> LockError {
    match err.kind() {
        RedisErrorKind::IO
        | RedisErrorKind::Timeout
        | RedisErrorKind::Canceled
        | RedisErrorKind::Auth
        | RedisErrorKind::Cluster
        | RedisErrorKind::Sentinel
        | RedisErrorKind::Backpressure => LockError::Connection(Box::new(err)),
        _ => LockError::Backend(Box::new(err)),
    }
}
