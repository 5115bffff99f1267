//! Eventbrite orders API client.
//!
//! A low-level HTTP client for `GET /v3/users/me/orders/`, authenticated
//! with a per-request bearer token. Pagination follows the continuation
//! contract: each response carries `pagination.continuation` and
//! `pagination.has_more_items`; an absent flag or empty token terminates.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::aggregate::{BoxFuture, OrderSource};
use crate::error::{ExportError, ExportResult};
use crate::raw_order::{RawOrder, UpstreamPage};

/// Base URL for the Eventbrite API v3.
const EVENTBRITE_API_BASE: &str = "https://www.eventbriteapi.com/v3";

/// Expansions requested on every orders page. The normalizer depends on the
/// nested event, its venue, and the attendees being present.
const ORDER_EXPANSIONS: &str = "event,event.venue,attendees";

/// Eventbrite API client bound to one user's access token.
#[derive(Debug)]
pub struct EventbriteClient {
    http_client: reqwest::Client,
    access_token: String,
    api_base: String,
}

impl EventbriteClient {
    /// Creates a client with the given bearer token.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            access_token: access_token.into(),
            api_base: EVENTBRITE_API_BASE.to_string(),
        }
    }

    /// Overrides the API base URL, for test harnesses pointing at a stub
    /// server.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Fetches one page of the authenticated user's orders.
    ///
    /// # Errors
    ///
    /// Non-success statuses become [`ExportError::Upstream`] with the status
    /// and body preserved; transport failures become
    /// [`ExportError::Network`]; bodies that do not parse become
    /// [`ExportError::InvalidResponse`]. Nothing is retried here.
    pub async fn fetch_orders_page(
        &self,
        continuation: Option<&str>,
    ) -> ExportResult<UpstreamPage> {
        let url = format!("{}/users/me/orders/", self.api_base);

        let mut request = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .query(&[("expand", ORDER_EXPANSIONS)]);

        if let Some(token) = continuation {
            request = request.query(&[("continuation", token)]);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ExportError::Network("request timeout".to_string())
            } else if e.is_connect() {
                ExportError::Network(format!("connection failed: {}", e))
            } else {
                ExportError::Network(format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExportError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ExportError::Network(format!("failed to read response: {}", e)))?;

        let list: OrderListResponse = serde_json::from_str(&body).map_err(|e| {
            ExportError::InvalidResponse(format!("failed to parse orders page: {}", e))
        })?;

        let next = next_cursor(list.pagination.as_ref());
        debug!(
            records = list.orders.len(),
            has_next = next.is_some(),
            "fetched orders page"
        );

        Ok(UpstreamPage {
            records: list.orders,
            next,
        })
    }
}

impl OrderSource for EventbriteClient {
    fn fetch_page<'a>(
        &'a self,
        continuation: Option<&'a str>,
    ) -> BoxFuture<'a, ExportResult<UpstreamPage>> {
        Box::pin(self.fetch_orders_page(continuation))
    }
}

/// Extracts the next continuation token, treating a cleared `has_more_items`
/// flag or an empty token as the termination sentinel.
fn next_cursor(pagination: Option<&ApiPagination>) -> Option<String> {
    let pagination = pagination?;
    if !pagination.has_more_items {
        return None;
    }
    pagination
        .continuation
        .as_deref()
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Response from the orders endpoint.
#[derive(Debug, Deserialize)]
struct OrderListResponse {
    #[serde(default)]
    orders: Vec<RawOrder>,
    pagination: Option<ApiPagination>,
}

/// Pagination block from the API.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiPagination {
    continuation: Option<String>,
    has_more_items: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_orders_page_with_continuation() {
        let json = r#"{
            "orders": [
                {
                    "id": "100",
                    "event": {
                        "name": { "text": "RustConf 2024" },
                        "start": { "utc": "2024-09-10T16:00:00Z" }
                    }
                }
            ],
            "pagination": {
                "continuation": "AlpY2",
                "has_more_items": true,
                "page_count": 3
            }
        }"#;

        let response: OrderListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.orders.len(), 1);
        assert_eq!(
            next_cursor(response.pagination.as_ref()),
            Some("AlpY2".to_string())
        );
    }

    #[test]
    fn parse_final_page() {
        let json = r#"{
            "orders": [],
            "pagination": { "has_more_items": false }
        }"#;

        let response: OrderListResponse = serde_json::from_str(json).unwrap();
        assert!(response.orders.is_empty());
        assert_eq!(next_cursor(response.pagination.as_ref()), None);
    }

    #[test]
    fn missing_pagination_block_terminates() {
        let response: OrderListResponse = serde_json::from_str(r#"{ "orders": [] }"#).unwrap();
        assert_eq!(next_cursor(response.pagination.as_ref()), None);
    }

    #[test]
    fn empty_continuation_token_terminates() {
        let pagination = ApiPagination {
            continuation: Some(String::new()),
            has_more_items: true,
        };
        assert_eq!(next_cursor(Some(&pagination)), None);
    }

    #[test]
    fn more_items_without_token_terminates() {
        let pagination = ApiPagination {
            continuation: None,
            has_more_items: true,
        };
        assert_eq!(next_cursor(Some(&pagination)), None);
    }
}
