//! Core protocol, store seam and types for simple Redis locks.

pub mod error;
pub mod manager;
pub mod memory;
pub mod name;
pub mod prelude;
pub mod record;
pub mod store;
pub mod ttl;

pub use error::{LockError, LockResult};
pub use prelude::*;
