//! Lock record codec.
//!
//! A lock record is the acquisition instant rendered as
//! `2024-05-01 13:45:12.345 +0200`: local date and time with milliseconds and
//! the numeric UTC offset. Records written by other clients sharing the store
//! use the same layout.

use chrono::{DateTime, FixedOffset, Local, TimeZone};

use crate::error::{LockError, LockResult};

/// Layout used when writing records.
pub const RECORD_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f %z";

// Accepts any fractional precision so slightly different writers still parse.
const PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f %z";

/// Renders an instant as a lock record.
pub fn encode<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    at.format(RECORD_FORMAT).to_string()
}

/// Renders the current local time as a lock record.
pub fn now() -> String {
    encode(&Local::now())
}

/// Parses the record stored under `key`.
pub fn decode(key: &str, value: &str) -> LockResult<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, PARSE_FORMAT).map_err(|source| LockError::MalformedRecord {
        key: key.to_string(),
        value: value.to_string(),
        source,
    })
}
