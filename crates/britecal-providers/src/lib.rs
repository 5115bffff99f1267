//! OrderSource trait and the Eventbrite implementation.
//!
//! This crate covers everything between the HTTP boundary and the calendar
//! encoder:
//!
//! - [`OrderSource`] - paged access to raw upstream order records
//! - [`EventbriteClient`] - the one real source, talking to the Eventbrite v3 API
//! - [`normalize_order`] - per-record conversion to [`CanonicalEvent`]
//! - [`build_batch`] - drives pagination and collects the batch
//! - [`OAuthClient`] - authorization-code exchange for an access token
//!
//! # Pipeline
//!
//! ```text
//! ┌────────────────────┐
//! │  Eventbrite API    │
//! └─────────┬──────────┘
//!           │ fetch_page (continuation tokens)
//!           ▼
//!    ┌─────────────┐
//!    │ UpstreamPage │ ... per record: normalize_order()
//!    └──────┬──────┘
//!           ▼ build_batch()
//!       ┌───────┐
//!       │ Batch │  (events in upstream order + skip count)
//!       └───────┘
//! ```
//!
//! Per-record failures are counted and skipped; any page-level failure
//! aborts the whole batch.
//!
//! [`CanonicalEvent`]: britecal_core::CanonicalEvent

pub mod aggregate;
pub mod error;
pub mod eventbrite;
pub mod normalize;
pub mod raw_order;

// Re-export main types at crate root
pub use aggregate::{BoxFuture, DEFAULT_MAX_PAGES, OrderSource, build_batch};
pub use error::{ExportError, ExportResult, NormalizeError};
pub use eventbrite::{EventbriteClient, EventbriteConfig, OAuthClient, OAuthCredentials};
pub use normalize::normalize_order;
pub use raw_order::{
    RawAddress, RawAttendee, RawEventPayload, RawOrder, RawText, RawTimestamp, RawVenue,
    UpstreamPage,
};
