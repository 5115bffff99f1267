//! Eventbrite backend: OAuth token exchange and the orders API client.
//!
//! The supported upstream contract is the v3 orders endpoint with
//! continuation-token pagination. The legacy page-number and plain
//! event-list endpoints are deliberately not supported.

mod client;
mod config;
mod oauth;

pub use client::EventbriteClient;
pub use config::{EventbriteConfig, OAuthCredentials};
pub use oauth::OAuthClient;
