//! iCalendar document encoding.
//!
//! Serializes an ordered slice of [`CanonicalEvent`]s into a single
//! VCALENDAR document, one VEVENT per input event, in input order. Text
//! escaping and line folding are handled by the `icalendar` crate; this
//! module performs no semantic validation (an end before its start is
//! encoded as-is).
//!
//! Output is deterministic: DTSTAMP is derived from the event start rather
//! than the wall clock, and UIDs are either the upstream id or a stable
//! synthesis from title + start. Encoding the same events twice yields
//! byte-identical documents.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::event::CanonicalEvent;

/// MIME type for the exported document.
pub const CALENDAR_MIME_TYPE: &str = "text/calendar";

/// Suggested download filename for the exported document.
pub const CALENDAR_FILENAME: &str = "eventbrite_events.ics";

/// Compact UTC layout used for DTSTAMP and synthesized UIDs.
const ICAL_UTC_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Maximum length of the title-derived part of a synthesized UID.
const UID_SLUG_MAX: usize = 40;

/// Encodes events into a VCALENDAR document, preserving input order.
pub fn encode_calendar(events: &[CanonicalEvent]) -> String {
    let mut calendar = Calendar::new();
    for event in events {
        calendar.push(encode_event(event));
    }
    calendar.done().to_string()
}

/// Encodes one canonical event as a VEVENT.
fn encode_event(event: &CanonicalEvent) -> icalendar::Event {
    let mut vevent = icalendar::Event::new();
    vevent.uid(&event_uid(event));
    vevent.summary(&event.title);
    vevent.starts(event.start);
    vevent.ends(event.end);

    // DTSTAMP is required by RFC 5545. Derived from the event start so the
    // same input always encodes to the same bytes.
    let dtstamp = event.start.format(ICAL_UTC_FORMAT).to_string();
    vevent.add_property("DTSTAMP", dtstamp.as_str());

    if let Some(ref location) = event.location {
        vevent.location(location);
    }
    if let Some(ref description) = event.description {
        vevent.description(description);
    }
    if let Some(ref url) = event.url {
        vevent.add_property("URL", url.as_str());
    }

    vevent.done()
}

/// Returns the UID for an event, synthesizing one when the upstream id is
/// empty. The encoder never requires UIDs to be unique across the document.
fn event_uid(event: &CanonicalEvent) -> String {
    let id = event.id.trim();
    if !id.is_empty() {
        return id.to_string();
    }
    synthesize_uid(&event.title, &event.start)
}

/// Builds a stable UID from the title and start time.
fn synthesize_uid(title: &str, start: &DateTime<Utc>) -> String {
    let slug: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
        .chars()
        .take(UID_SLUG_MAX)
        .collect();

    let slug = if slug.is_empty() {
        "event".to_string()
    } else {
        slug
    };

    format!("{}-{}@britecal", slug, start.format(ICAL_UTC_FORMAT))
}
