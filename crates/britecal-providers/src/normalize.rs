//! RawOrder to CanonicalEvent conversion.
//!
//! [`normalize_order`] is a pure function: same input, same output or the
//! same failure, no I/O. Required fields (expanded event, title, start
//! timestamp) fail the record; everything else degrades to a sensible
//! default or is omitted.

use britecal_core::{CanonicalEvent, parse_utc_timestamp};

use crate::error::NormalizeError;
use crate::raw_order::{RawEventPayload, RawOrder, RawVenue};

/// Separator between address components in a formatted location.
const LOCATION_SEPARATOR: &str = ", ";

/// Separator between description sections.
const SECTION_SEPARATOR: &str = "\n\n";

/// Converts one raw order into a canonical event.
///
/// Fails when the order has no expanded event payload, when the event title
/// is missing or blank, or when a start/end timestamp is missing or
/// unparseable. An absent end timestamp is not a failure: the event becomes
/// zero-duration with `end = start`.
pub fn normalize_order(order: &RawOrder) -> Result<CanonicalEvent, NormalizeError> {
    // Diagnostic label only; the canonical event keeps the real upstream id,
    // even when that id is empty, so the encoder can synthesize a UID.
    let record_id = order
        .id
        .as_deref()
        .filter(|id| !id.trim().is_empty())
        .unwrap_or("<no id>")
        .to_string();

    let event = order
        .event
        .as_ref()
        .ok_or_else(|| NormalizeError::MissingEvent {
            record_id: record_id.clone(),
        })?;

    let title = event
        .name
        .as_ref()
        .and_then(|name| name.text.as_deref())
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .ok_or_else(|| NormalizeError::MissingTitle {
            record_id: record_id.clone(),
        })?;

    let start_raw = event
        .start
        .as_ref()
        .and_then(|ts| ts.utc.as_deref())
        .ok_or_else(|| NormalizeError::MissingStart {
            record_id: record_id.clone(),
        })?;
    let start = parse_utc_timestamp(start_raw).map_err(|source| {
        NormalizeError::InvalidTimestamp {
            record_id: record_id.clone(),
            field: "start",
            source,
        }
    })?;

    // A present-but-broken end drops the record; a missing end defaults to
    // the start, permitting zero-duration events.
    let end = match event.end.as_ref().and_then(|ts| ts.utc.as_deref()) {
        Some(raw) => parse_utc_timestamp(raw).map_err(|source| {
            NormalizeError::InvalidTimestamp {
                record_id: record_id.clone(),
                field: "end",
                source,
            }
        })?,
        None => start,
    };

    let upstream_id = order.id.clone().unwrap_or_default();
    let mut canonical = CanonicalEvent::new(upstream_id, title, start).with_end(end);

    if let Some(location) = format_location(event.venue.as_ref()) {
        canonical = canonical.with_location(location);
    }

    if let Some(url) = event
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
    {
        canonical = canonical.with_url(url);
    }

    if let Some(description) = build_description(order, event) {
        canonical = canonical.with_description(description);
    }

    Ok(canonical)
}

/// Joins the non-empty address components of a venue, in a fixed order.
///
/// Returns `None` (rather than an empty string) when the venue is absent or
/// has no usable components, so the encoder omits LOCATION entirely.
fn format_location(venue: Option<&RawVenue>) -> Option<String> {
    let venue = venue?;
    let address = venue.address.as_ref();

    let components = [
        venue.name.as_deref(),
        address.and_then(|a| a.address_1.as_deref()),
        address.and_then(|a| a.address_2.as_deref()),
        address.and_then(|a| a.city.as_deref()),
        address.and_then(|a| a.region.as_deref()),
        address.and_then(|a| a.postal_code.as_deref()),
        address.and_then(|a| a.country.as_deref()),
    ];

    let parts: Vec<&str> = components
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(LOCATION_SEPARATOR))
    }
}

/// Assembles the event description from its optional sections.
///
/// Sections, in order: raw description text, order reference, one line per
/// attendee ticket class, the event URL. Absent sections are omitted;
/// present ones are joined by a blank line.
fn build_description(order: &RawOrder, event: &RawEventPayload) -> Option<String> {
    let mut sections: Vec<String> = Vec::new();

    if let Some(text) = event
        .description
        .as_ref()
        .and_then(|desc| desc.text.as_deref())
        .map(str::trim)
        .filter(|text| !text.is_empty())
    {
        sections.push(text.to_string());
    }

    if let Some(id) = order
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        sections.push(format!("Order reference: {}", id));
    }

    let tickets: Vec<String> = order
        .attendees
        .iter()
        .filter_map(|attendee| attendee.ticket_class_name.as_deref())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| format!("Ticket: {}", name))
        .collect();
    if !tickets.is_empty() {
        sections.push(tickets.join("\n"));
    }

    if let Some(url) = event
        .url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
    {
        sections.push(url.to_string());
    }

    if sections.is_empty() {
        None
    } else {
        Some(sections.join(SECTION_SEPARATOR))
    }
}
