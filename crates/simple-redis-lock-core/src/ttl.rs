//! Lock ttl helpers.

use std::time::Duration;

use crate::error::{LockError, LockResult};

/// A lock expiry in whole milliseconds, as sent with `SET ... PX`.
///
/// Sub-millisecond precision is truncated, so `Duration::from_secs_f64(0.0015)`
/// becomes 1ms. Values that truncate to zero are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LockTtl {
    millis: u64,
}

impl LockTtl {
    /// Converts a duration, rejecting anything shorter than one millisecond.
    pub fn new(ttl: Duration) -> LockResult<Self> {
        let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
        if millis == 0 {
            return Err(LockError::InvalidTtl(ttl));
        }
        Ok(Self { millis })
    }

    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_millis(self.millis)
    }
}

impl TryFrom<Duration> for LockTtl {
    type Error = LockError;

    fn try_from(ttl: Duration) -> LockResult<Self> {
        Self::new(ttl)
    }
}
