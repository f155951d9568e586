//! Convenience prelude for lock types.

pub use crate::error::{LockError, LockResult};
pub use crate::manager::LockManager;
pub use crate::memory::MemoryLockStore;
pub use crate::store::{KeyTtl, LockStore};
pub use crate::ttl::LockTtl;
