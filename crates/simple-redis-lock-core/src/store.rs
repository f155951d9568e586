//! The store seam the lock protocol runs against.

use std::future::Future;
use std::time::Duration;

use crate::error::LockResult;
use crate::ttl::LockTtl;

// ============================================================================
// Remaining TTL
// ============================================================================

/// Remaining lifetime of a key as reported by the store.
///
/// Mirrors the Redis `PTTL` reply: `-2` for a missing key, `-1` for a key
/// without expiry, otherwise the remaining milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTtl {
    /// The key does not exist (never set, released, or expired).
    Missing,
    /// The key exists but carries no expiration.
    Persistent,
    /// The key expires after this duration.
    Expires(Duration),
}

impl KeyTtl {
    /// Decodes a `PTTL` style reply.
    pub fn from_pttl(pttl: i64) -> Self {
        match pttl {
            -1 => Self::Persistent,
            n if n < 0 => Self::Missing,
            n => Self::Expires(Duration::from_millis(n as u64)),
        }
    }
}

// ============================================================================
// Lock Store Trait
// ============================================================================

/// A key-value store able to back a lock.
///
/// Each method maps to exactly one store round trip. Implementations must make
/// `set_if_absent` atomic: of any number of concurrent calls for the same
/// absent key, exactly one returns `true`.
///
/// # Example
///
/// ```rust,ignore
/// let store = RedisLockStore::new(client);
/// let manager = LockManager::new(store);
/// if manager.lock("nightly-report", Duration::from_secs(30)).await? {
///     build_report().await;
///     manager.release("nightly-report").await?;
/// }
/// ```
pub trait LockStore: Send + Sync {
    /// Short backend name used in tracing fields.
    fn backend(&self) -> &'static str;

    /// Sets `key` to `value` with a relative expiry, only if `key` is absent.
    ///
    /// Returns `true` if the value was written.
    fn set_if_absent(
        &self,
        key: &str,
        value: &str,
        ttl: LockTtl,
    ) -> impl Future<Output = LockResult<bool>> + Send;

    /// Deletes `key`. Deleting a missing key succeeds.
    fn delete(&self, key: &str) -> impl Future<Output = LockResult<()>> + Send;

    /// Reads the value stored under `key`.
    fn get(&self, key: &str) -> impl Future<Output = LockResult<Option<String>>> + Send;

    /// Reads the remaining lifetime of `key`.
    fn remaining_ttl(&self, key: &str) -> impl Future<Output = LockResult<KeyTtl>> + Send;
}
