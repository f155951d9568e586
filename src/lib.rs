//! Simple try-locks over a shared Redis instance.
//!
//! A lock is a single Redis key, `SimpleRedisLock:<name>`, written with
//! `SET NX PX`. Its value is the acquisition time and its expiry is the lock
//! ttl, so a crashed holder never blocks others for longer than that ttl.
//! Locking is a single attempt: there is no waiting, retrying or renewal.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use simple_redis_lock::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = RedisLockStore::connect("redis://localhost:6379").await?;
//!     let locks = LockManager::new(store);
//!
//!     // Run a closure under the lock; it is released afterwards, even on panic
//!     let outcome = locks
//!         .lock_with("daily-export", Duration::from_secs(30), || async {
//!             println!("exporting...");
//!             42
//!         })
//!         .await?;
//!
//!     match outcome {
//!         Some(rows) => println!("exported {rows} rows"),
//!         None => println!("another process is exporting"),
//!     }
//!
//!     // Or hold it until an explicit release
//!     if locks.lock("daily-export", Duration::from_secs(30)).await? {
//!         println!("acquired at {:?}", locks.acquired_at("daily-export").await?);
//!         locks.release("daily-export").await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Crate Organization
//!
//! This is a meta-crate that re-exports types from:
//! - `simple-redis-lock-core`: the lock manager, store trait, errors and an
//!   in-memory store
//! - `simple-redis-lock-redis`: the Redis store and its builder
//!
//! For fine-grained control, you can depend on individual crates instead.

// Re-export core types and traits
pub use simple_redis_lock_core::*;

// Re-export redis backend
pub use simple_redis_lock_redis::{RedisLockStore, RedisLockStoreBuilder};
