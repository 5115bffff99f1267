//! Error types for the export pipeline.
//!
//! Two distinct failure levels exist, and they never mix:
//!
//! - [`ExportError`] - batch-level; any of these aborts the whole export.
//! - [`NormalizeError`] - record-level; the aggregator drops the record,
//!   counts it, and keeps going.

use britecal_core::TimestampError;
use thiserror::Error;

/// A specialized Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// A batch-level export failure.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Upstream responded with a non-success status. Not retried; the
    /// boundary passes the status through.
    #[error("upstream API error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Transport-level failure: timeout, connect, or read.
    #[error("network error: {0}")]
    Network(String),

    /// The upstream body did not match the expected shape.
    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),

    /// No page ever returned a record.
    #[error("upstream returned no orders")]
    EmptyBatch,

    /// Records came back but every one of them failed normalization.
    #[error("no order could be converted to a calendar event ({skipped} records skipped)")]
    NoValidEvents { skipped: usize },

    /// The continuation token never terminated within the page bound.
    #[error("pagination did not terminate within {limit} pages")]
    PaginationLimitExceeded { limit: usize },
}

impl ExportError {
    /// Machine-readable kind, stable across releases. The boundary includes
    /// this in error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Upstream { .. } => "upstream_error",
            Self::Network(_) => "network_error",
            Self::InvalidResponse(_) => "invalid_response",
            Self::EmptyBatch => "empty_batch",
            Self::NoValidEvents { .. } => "no_valid_events",
            Self::PaginationLimitExceeded { .. } => "pagination_limit_exceeded",
        }
    }

    /// Returns true for the "nothing to export" conditions, which the
    /// boundary reports as not-found rather than as an upstream outage.
    pub fn is_nothing_to_export(&self) -> bool {
        matches!(self, Self::EmptyBatch | Self::NoValidEvents { .. })
    }
}

/// A per-record normalization failure.
///
/// Always carries the upstream record id for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// The order came back without its event expanded.
    #[error("order {record_id} has no expanded event payload")]
    MissingEvent { record_id: String },

    /// The event has no usable title.
    #[error("order {record_id} has no event title")]
    MissingTitle { record_id: String },

    /// The event has no start timestamp at all.
    #[error("order {record_id} has no start timestamp")]
    MissingStart { record_id: String },

    /// A timestamp was present but unparseable. The record is dropped, not
    /// salvaged with a default.
    #[error("order {record_id} has an invalid {field} timestamp")]
    InvalidTimestamp {
        record_id: String,
        field: &'static str,
        #[source]
        source: TimestampError,
    },
}

impl NormalizeError {
    /// The upstream record id this failure belongs to.
    pub fn record_id(&self) -> &str {
        match self {
            Self::MissingEvent { record_id }
            | Self::MissingTitle { record_id }
            | Self::MissingStart { record_id }
            | Self::InvalidTimestamp { record_id, .. } => record_id,
        }
    }
}
