//! Raw order records as returned by the Eventbrite v3 API.
//!
//! These shapes mirror the wire format of `GET /v3/users/me/orders/` with
//! `expand=event,event.venue,attendees`. Every field is optional: the
//! upstream schema is treated as a black box that may omit anything, and the
//! normalizer performs explicit presence checks on each path it needs.

use serde::Deserialize;

/// One fetch result: the page's records plus the continuation cursor.
///
/// `next = None` signals that pagination is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamPage {
    /// Raw records in upstream order.
    pub records: Vec<RawOrder>,
    /// Continuation token for the next page.
    pub next: Option<String>,
}

/// An order record, optionally carrying its expanded event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawOrder {
    /// Upstream order identifier, doubles as the order reference shown in
    /// event descriptions.
    pub id: Option<String>,
    /// Order status string (e.g. "placed", "refunded").
    pub status: Option<String>,
    /// The expanded event this order is for. Absent when the caller forgot
    /// the expansion or the event was deleted upstream.
    pub event: Option<RawEventPayload>,
    /// Expanded attendees on this order.
    pub attendees: Vec<RawAttendee>,
}

/// The event payload nested inside an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawEventPayload {
    pub name: Option<RawText>,
    pub description: Option<RawText>,
    pub start: Option<RawTimestamp>,
    pub end: Option<RawTimestamp>,
    /// Public event page URL.
    pub url: Option<String>,
    pub venue: Option<RawVenue>,
}

/// Eventbrite's text wrapper: plain text plus an HTML rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawText {
    pub text: Option<String>,
    pub html: Option<String>,
}

/// A timestamp triple as the API reports it. Only `utc` is consumed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawTimestamp {
    /// `YYYY-MM-DDTHH:MM:SSZ` string.
    pub utc: Option<String>,
    pub timezone: Option<String>,
    pub local: Option<String>,
}

/// An expanded venue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawVenue {
    pub name: Option<String>,
    pub address: Option<RawAddress>,
}

/// Venue address components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawAddress {
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// An attendee on an order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawAttendee {
    /// Display name of the ticket class this attendee holds.
    pub ticket_class_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_expanded_order() {
        let json = r#"{
            "id": "1234567890",
            "status": "placed",
            "event": {
                "name": { "text": "RustConf 2024", "html": "<p>RustConf 2024</p>" },
                "description": { "text": "Three days of Rust." },
                "start": { "utc": "2024-09-10T16:00:00Z", "timezone": "America/New_York" },
                "end": { "utc": "2024-09-12T22:00:00Z" },
                "url": "https://www.eventbrite.com/e/rustconf-2024",
                "venue": {
                    "name": "Convention Center",
                    "address": {
                        "address_1": "255 Main St",
                        "city": "Montreal",
                        "region": "QC",
                        "postal_code": "H2Y 4B2",
                        "country": "CA"
                    }
                }
            },
            "attendees": [
                { "ticket_class_name": "General Admission" },
                { "ticket_class_name": "Workshop Pass" }
            ]
        }"#;

        let order: RawOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id.as_deref(), Some("1234567890"));
        let event = order.event.unwrap();
        assert_eq!(
            event.name.unwrap().text.as_deref(),
            Some("RustConf 2024")
        );
        assert_eq!(
            event.start.unwrap().utc.as_deref(),
            Some("2024-09-10T16:00:00Z")
        );
        assert_eq!(event.venue.unwrap().name.as_deref(), Some("Convention Center"));
        assert_eq!(order.attendees.len(), 2);
    }

    #[test]
    fn tolerates_sparse_order() {
        let order: RawOrder = serde_json::from_str("{}").unwrap();
        assert!(order.id.is_none());
        assert!(order.event.is_none());
        assert!(order.attendees.is_empty());
    }

    #[test]
    fn tolerates_unknown_fields() {
        let json = r#"{ "id": "1", "resource_uri": "https://api/orders/1", "costs": {} }"#;
        let order: RawOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id.as_deref(), Some("1"));
    }
}
