//! The lock protocol.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use chrono::{DateTime, FixedOffset};
use futures::FutureExt;
use tracing::{field, instrument, warn, Span};

use crate::error::LockResult;
use crate::name::lock_key;
use crate::record;
use crate::store::{KeyTtl, LockStore};
use crate::ttl::LockTtl;

/// Try-lock mutual exclusion over a shared [`LockStore`].
///
/// The manager keeps no state of its own: a lock is held exactly while its
/// record exists in the store, and the store drops the record once the ttl
/// elapses. Acquisition is a single non-blocking attempt. Release deletes the
/// record without checking who wrote it, so a holder that outlives its ttl can
/// release a lock that has since been taken by someone else.
///
/// # Example
///
/// ```rust,ignore
/// let manager = LockManager::new(RedisLockStore::new(client));
///
/// // Runs the closure only if the lock was free, then releases it.
/// match manager.lock_with("invoice-42", Duration::from_secs(5), || send_invoice()).await? {
///     Some(receipt) => println!("sent: {receipt:?}"),
///     None => println!("another worker is sending it"),
/// }
/// ```
#[derive(Debug, Clone)]
pub struct LockManager<S> {
    store: S,
}

impl<S: LockStore> LockManager<S> {
    /// Creates a manager over the given store client.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tries once to acquire the lock `name` for `ttl`.
    ///
    /// Returns `true` if the lock is now held; the caller must [`release`]
    /// it, or let it expire. Returns `false` if someone else holds it.
    ///
    /// [`release`]: Self::release
    #[instrument(skip(self), fields(lock.name = %name, backend = self.store.backend(), acquired = field::Empty))]
    pub async fn lock(&self, name: &str, ttl: Duration) -> LockResult<bool> {
        let key = lock_key(name)?;
        let ttl = LockTtl::new(ttl)?;

        let acquired = self.store.set_if_absent(&key, &record::now(), ttl).await?;
        Span::current().record("acquired", acquired);
        Ok(acquired)
    }

    /// Tries once to acquire the lock `name` and runs `work` while holding it.
    ///
    /// The lock is released when `work` finishes, whatever its output, and
    /// also when it panics, in which case the panic resumes after the release.
    ///
    /// Returns `Some(output)` if the lock was acquired and `None` if someone
    /// else holds it. If the release itself fails, its error is returned and
    /// the record is left to expire.
    ///
    /// Dropping the returned future while `work` runs skips the release; the
    /// lock then expires after `ttl`.
    #[instrument(skip(self, work), fields(lock.name = %name, backend = self.store.backend()))]
    pub async fn lock_with<F, Fut, T>(
        &self,
        name: &str,
        ttl: Duration,
        work: F,
    ) -> LockResult<Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = T>,
    {
        if !self.lock(name, ttl).await? {
            return Ok(None);
        }

        let outcome = AssertUnwindSafe(async move { work().await })
            .catch_unwind()
            .await;
        let released = self.release(name).await;

        match outcome {
            Ok(output) => {
                released?;
                Ok(Some(output))
            }
            Err(panic) => {
                if let Err(err) = released {
                    warn!(error = %err, "failed to release lock after panic, leaving it to expire");
                }
                std::panic::resume_unwind(panic)
            }
        }
    }

    /// Releases the lock `name`.
    ///
    /// Releasing a lock that is not held is a no-op.
    #[instrument(skip(self), fields(lock.name = %name, backend = self.store.backend()))]
    pub async fn release(&self, name: &str) -> LockResult<()> {
        let key = lock_key(name)?;
        self.store.delete(&key).await
    }

    /// Returns when the lock `name` was acquired, or `None` if it is free.
    #[instrument(skip(self), fields(lock.name = %name, backend = self.store.backend()))]
    pub async fn acquired_at(&self, name: &str) -> LockResult<Option<DateTime<FixedOffset>>> {
        let key = lock_key(name)?;
        match self.store.get(&key).await? {
            Some(value) => record::decode(&key, &value).map(Some),
            None => Ok(None),
        }
    }

    /// Returns the time left before the lock `name` expires, or `None` if it
    /// is free.
    ///
    /// A record without expiry was not written by this crate; it is reported
    /// as `Duration::MAX`.
    #[instrument(skip(self), fields(lock.name = %name, backend = self.store.backend()))]
    pub async fn ttl(&self, name: &str) -> LockResult<Option<Duration>> {
        let key = lock_key(name)?;
        match self.store.remaining_ttl(&key).await? {
            KeyTtl::Missing => Ok(None),
            KeyTtl::Expires(remaining) => Ok(Some(remaining)),
            KeyTtl::Persistent => {
                warn!(lock.key = %key, "lock record has no expiry");
                Ok(Some(Duration::MAX))
            }
        }
    }

    /// Returns whether the lock `name` is currently held by anyone.
    pub async fn is_locked(&self, name: &str) -> LockResult<bool> {
        Ok(self.ttl(name).await?.is_some())
    }
}
