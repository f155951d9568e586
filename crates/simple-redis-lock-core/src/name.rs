//! Lock key namespacing.

use crate::error::{LockError, LockResult};

/// Prefix shared by every lock record in the store.
///
/// This is the on-the-wire key format; changing it breaks interoperation with
/// locks held by other deployments.
pub const KEY_PREFIX: &str = "SimpleRedisLock:";

/// Converts a caller lock name into its store key.
pub fn lock_key(name: &str) -> LockResult<String> {
    if name.is_empty() {
        return Err(LockError::InvalidName(
            "lock name cannot be empty".to_string(),
        ));
    }
    Ok(format!("{}{}", KEY_PREFIX, name))
}
