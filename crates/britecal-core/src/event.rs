//! Canonical event and batch types.
//!
//! [`CanonicalEvent`] is the normalized unit that ends up in the exported
//! calendar. It is produced by the provider crate's normalizer and consumed
//! by the iCalendar encoder; nothing downstream ever touches raw upstream
//! records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A normalized calendar event.
///
/// Invariants upheld by the normalizer, not by this type:
/// - `title` is non-empty,
/// - `end` defaults to `start` when the upstream record had no end time.
///
/// `start <= end` is deliberately NOT an invariant; upstream data with an
/// end before its start is exported as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    /// Opaque upstream identifier, used only for diagnostics and UID
    /// derivation. May be empty.
    pub id: String,

    /// Display title of the event.
    pub title: String,

    /// Event start, always UTC.
    pub start: DateTime<Utc>,

    /// Event end, always UTC. Equals `start` for zero-duration events.
    pub end: DateTime<Utc>,

    /// Formatted venue address, absent when the record had no usable
    /// address components.
    pub location: Option<String>,

    /// Upstream event page link.
    pub url: Option<String>,

    /// Assembled free-text description.
    pub description: Option<String>,
}

impl CanonicalEvent {
    /// Creates an event with the required fields; `end` starts out equal to
    /// `start`.
    pub fn new(id: impl Into<String>, title: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end: start,
            location: None,
            url: None,
            description: None,
        }
    }

    /// Builder method to set the end time.
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = end;
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the event URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// The result of aggregating every page of upstream records.
///
/// Event order is the concatenation order of pages as fetched, record order
/// preserved within each page. No reordering, no dedup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    /// Events that survived normalization, in upstream order.
    pub events: Vec<CanonicalEvent>,
    /// Number of records dropped by normalization failures.
    pub skipped: usize,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a normalized event, preserving insertion order.
    pub fn push(&mut self, event: CanonicalEvent) {
        self.events.push(event);
    }

    /// Records one dropped record.
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Number of events in the batch.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no event survived normalization.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
