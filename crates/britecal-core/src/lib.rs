//! Core types: canonical events, UTC timestamps, iCalendar encoding

pub mod event;
pub mod ical;
pub mod time;
pub mod tracing;

pub use event::{Batch, CanonicalEvent};
pub use ical::{encode_calendar, CALENDAR_FILENAME, CALENDAR_MIME_TYPE};
pub use time::{parse_utc_timestamp, TimestampError};
pub use tracing::{init_tracing, TracingConfig, TracingError, TracingOutputFormat};
