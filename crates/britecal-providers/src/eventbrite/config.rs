//! Eventbrite application configuration.

use std::time::Duration;

use crate::aggregate::DEFAULT_MAX_PAGES;

/// Default timeout for upstream HTTP calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// OAuth application credentials issued by Eventbrite.
///
/// Constructed once at process start and passed in explicitly; never read
/// from ambient global state.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    /// The application's API key (OAuth client id).
    pub client_id: String,
    /// The application's client secret.
    pub client_secret: String,
}

impl OAuthCredentials {
    /// Creates credentials from a client id and secret.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// Configuration for talking to Eventbrite.
#[derive(Debug, Clone)]
pub struct EventbriteConfig {
    /// OAuth application credentials.
    pub credentials: OAuthCredentials,
    /// Redirect URI registered with the Eventbrite application.
    pub redirect_uri: String,
    /// Timeout applied to every upstream HTTP call.
    pub timeout: Duration,
    /// Upper bound on pages fetched per export.
    pub max_pages: usize,
}

impl EventbriteConfig {
    /// Creates a configuration with default timeout and page bound.
    pub fn new(credentials: OAuthCredentials, redirect_uri: impl Into<String>) -> Self {
        Self {
            credentials,
            redirect_uri: redirect_uri.into(),
            timeout: DEFAULT_TIMEOUT,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Builder: set the upstream timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: set the pagination bound.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }
}
