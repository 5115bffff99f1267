//! Shared application state.

use std::sync::Arc;

use britecal_providers::{EventbriteConfig, OAuthClient};

/// Immutable state shared by every request handler.
///
/// Holds configuration and the OAuth client only; per-request state (the
/// user's access token, the batch under construction) lives on the request
/// path, so concurrent exports share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<Inner>,
}

struct Inner {
    config: EventbriteConfig,
    oauth: OAuthClient,
}

impl AppState {
    /// Builds the shared state from the Eventbrite configuration.
    pub fn new(config: EventbriteConfig) -> Self {
        let oauth = OAuthClient::new(config.credentials.clone(), config.timeout);
        Self {
            inner: Arc::new(Inner { config, oauth }),
        }
    }

    /// The Eventbrite configuration.
    pub fn eventbrite(&self) -> &EventbriteConfig {
        &self.inner.config
    }

    /// The OAuth client.
    pub fn oauth(&self) -> &OAuthClient {
        &self.inner.oauth
    }
}
