//! Redis lock store implementation.

use std::fmt;

use fred::prelude::*;
use simple_redis_lock_core::error::LockResult;
use simple_redis_lock_core::store::{KeyTtl, LockStore};
use simple_redis_lock_core::ttl::LockTtl;
use tracing::trace;

use crate::builder::RedisLockStoreBuilder;
use crate::error::lock_error;

/// A [`LockStore`] backed by a single Redis server.
///
/// Each operation is one Redis command: `SET NX PX`, `DEL`, `GET` and
/// `PTTL`. The client is shared across clones and may be used from many tasks
/// at once.
#[derive(Clone)]
pub struct RedisLockStore {
    client: RedisClient,
}

impl RedisLockStore {
    /// Wraps an already connected client.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Returns a new builder for configuring the store.
    pub fn builder() -> RedisLockStoreBuilder {
        RedisLockStoreBuilder::new()
    }

    /// Connects to the Redis server at `url`.
    pub async fn connect(url: impl Into<String>) -> LockResult<Self> {
        Self::builder().url(url).build().await
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

impl fmt::Debug for RedisLockStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedisLockStore")
            .field("client", &self.client.id())
            .finish()
    }
}

impl LockStore for RedisLockStore {
    fn backend(&self) -> &'static str {
        "redis"
    }

    async fn set_if_absent(&self, key: &str, value: &str, ttl: LockTtl) -> LockResult<bool> {
        let expiry_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);

        // SET NX replies OK when the key was written and nil when it already exists
        let result: Option<String> = self
            .client
            .set(
                key,
                value,
                Some(Expiration::PX(expiry_millis)),
                Some(SetOptions::NX),
                false,
            )
            .await
            .map_err(lock_error)?;

        trace!(key, written = result.is_some(), "SET NX PX");
        Ok(result.is_some())
    }

    async fn delete(&self, key: &str) -> LockResult<()> {
        let removed: i64 = self.client.del(key).await.map_err(lock_error)?;
        trace!(key, removed, "DEL");
        Ok(())
    }

    async fn get(&self, key: &str) -> LockResult<Option<String>> {
        self.client.get(key).await.map_err(lock_error)
    }

    async fn remaining_ttl(&self, key: &str) -> LockResult<KeyTtl> {
        let pttl: i64 = self.client.pttl(key).await.map_err(lock_error)?;
        Ok(KeyTtl::from_pttl(pttl))
    }
}
