//! Redis backend for simple locks.

pub mod builder;
pub mod error;
pub mod store;

pub use builder::RedisLockStoreBuilder;
pub use store::RedisLockStore;
