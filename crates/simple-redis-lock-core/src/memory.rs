//! In-process lock store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::error::LockResult;
use crate::store::{KeyTtl, LockStore};
use crate::ttl::LockTtl;

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }
}

/// A [`LockStore`] kept in process memory.
///
/// Clones share the same entries, so one store can be handed to several
/// managers or tasks. Expired entries are dropped lazily on access.
#[derive(Debug, Clone, Default)]
pub struct MemoryLockStore {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryLockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `key` unconditionally, bypassing the lock protocol.
    ///
    /// `expiry` of `None` stores the value without expiration.
    pub fn put(&self, key: impl Into<String>, value: impl Into<String>, expiry: Option<Duration>) {
        let expires_at = expiry.map(|ttl| Instant::now() + ttl);
        self.entries().insert(
            key.into(),
            Entry {
                value: value.into(),
                expires_at,
            },
        );
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries();
        entries.retain(|_, entry| !entry.is_expired(now));
        entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the live entry for `key`, evicting it if it has expired.
    fn live<'a>(
        entries: &'a mut HashMap<String, Entry>,
        key: &str,
        now: Instant,
    ) -> Option<&'a Entry> {
        if entries.get(key).is_some_and(|entry| entry.is_expired(now)) {
            entries.remove(key);
        }
        entries.get(key)
    }
}

impl LockStore for MemoryLockStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: LockTtl) -> LockResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries();
        if Self::live(&mut entries, key, now).is_some() {
            return Ok(false);
        }

        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Some(now + ttl.as_duration()),
            },
        );
        Ok(true)
    }

    async fn delete(&self, key: &str) -> LockResult<()> {
        self.entries().remove(key);
        Ok(())
    }

    async fn get(&self, key: &str) -> LockResult<Option<String>> {
        let mut entries = self.entries();
        Ok(Self::live(&mut entries, key, Instant::now()).map(|entry| entry.value.clone()))
    }

    async fn remaining_ttl(&self, key: &str) -> LockResult<KeyTtl> {
        let now = Instant::now();
        let mut entries = self.entries();
        let ttl = match Self::live(&mut entries, key, now) {
            None => KeyTtl::Missing,
            Some(Entry {
                expires_at: None, ..
            }) => KeyTtl::Persistent,
            // Truncated to whole milliseconds like `PTTL`
            Some(Entry {
                expires_at: Some(at),
                ..
            }) => KeyTtl::Expires(Duration::from_millis(
                at.saturating_duration_since(now).as_millis() as u64,
            )),
        };
        Ok(ttl)
    }
}
