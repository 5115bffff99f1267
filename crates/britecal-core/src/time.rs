//! Strict UTC timestamp parsing.
//!
//! The upstream API reports event times as `YYYY-MM-DDTHH:MM:SSZ` strings in
//! its `utc` fields. Parsing is deliberately strict: offsets, fractional
//! seconds, and date-only values are all rejected so that a malformed record
//! fails normalization instead of being silently reinterpreted.

use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// The only accepted timestamp layout, with a literal trailing `Z`.
pub const UTC_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A timestamp string that does not match [`UTC_TIMESTAMP_FORMAT`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid UTC timestamp {value:?}: expected YYYY-MM-DDTHH:MM:SSZ")]
pub struct TimestampError {
    /// The offending input, kept for diagnostics.
    pub value: String,
}

impl TimestampError {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// Parses a `YYYY-MM-DDTHH:MM:SSZ` string into a UTC datetime.
pub fn parse_utc_timestamp(value: &str) -> Result<DateTime<Utc>, TimestampError> {
    NaiveDateTime::parse_from_str(value, UTC_TIMESTAMP_FORMAT)
        .map(|dt| dt.and_utc())
        .map_err(|_| TimestampError::new(value))
}
