//! Redis lock store configuration.

use std::io;

use fred::prelude::*;
use fred::types::ReconnectPolicy;
use simple_redis_lock_core::error::{LockError, LockResult};
use tracing::{debug, instrument};

use crate::error::lock_error;
use crate::store::RedisLockStore;

/// Builder for [`RedisLockStore`].
///
/// Either hand it a client the application already manages with
/// [`client`](Self::client), or a server URL with [`url`](Self::url) and let
/// [`build`](Self::build) connect.
pub struct RedisLockStoreBuilder {
    url: Option<String>,
    client: Option<RedisClient>,
    reconnect_policy: Option<ReconnectPolicy>,
}

impl RedisLockStoreBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: None,
            client: None,
            reconnect_policy: None,
        }
    }

    /// Sets the Redis server URL, e.g. `redis://localhost:6379/0`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Uses an existing Redis client. Takes precedence over [`url`](Self::url).
    pub fn client(mut self, client: RedisClient) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the reconnect policy for clients created from a URL.
    pub fn reconnect_policy(mut self, policy: ReconnectPolicy) -> Self {
        self.reconnect_policy = Some(policy);
        self
    }

    /// Builds the store, connecting to the server if a URL was given.
    #[instrument(skip(self), fields(backend = "redis"))]
    pub async fn build(self) -> LockResult<RedisLockStore> {
        if let Some(client) = self.client {
            return Ok(RedisLockStore::new(client));
        }

        let Some(url) = self.url else {
            return Err(LockError::Backend(Box::new(io::Error::new(
                io::ErrorKind::InvalidInput,
                "no Redis client or URL provided",
            ))));
        };

        let config = RedisConfig::from_url(&url).map_err(|e| {
            LockError::Backend(Box::new(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid Redis URL: {}", e),
            )))
        })?;

        let client = RedisClient::new(config, None, None, self.reconnect_policy);
        client.connect();
        client.wait_for_connect().await.map_err(lock_error)?;
        debug!(client = client.id(), "connected to Redis");

        Ok(RedisLockStore::new(client))
    }
}

impl Default for RedisLockStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}
