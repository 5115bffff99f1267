//! OAuth 2.0 authorization-code flow against Eventbrite.
//!
//! Server-side web flow: the boundary redirects the user to the consent
//! page, Eventbrite redirects back with a code, and the code is exchanged
//! here for a long-lived access token. Tokens are handed straight back to
//! the caller and never persisted.

use std::time::Duration;

use serde::Deserialize;
use tracing::info;

use crate::error::{ExportError, ExportResult};

use super::config::OAuthCredentials;

/// Eventbrite OAuth endpoints.
const AUTHORIZE_URL: &str = "https://www.eventbrite.com/oauth/authorize";
const TOKEN_URL: &str = "https://www.eventbrite.com/oauth/token";

/// OAuth client for Eventbrite.
#[derive(Debug)]
pub struct OAuthClient {
    credentials: OAuthCredentials,
    http_client: reqwest::Client,
}

impl OAuthClient {
    /// Creates an OAuth client with the given credentials.
    pub fn new(credentials: OAuthCredentials, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            credentials,
            http_client,
        }
    }

    /// Builds the consent-page URL the user should be redirected to.
    pub fn authorize_url(&self, redirect_uri: &str) -> String {
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}",
            AUTHORIZE_URL,
            urlencoding::encode(&self.credentials.client_id),
            urlencoding::encode(redirect_uri)
        )
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// A non-success response becomes [`ExportError::Upstream`] with the
    /// status preserved; an unparseable body becomes
    /// [`ExportError::InvalidResponse`].
    pub async fn exchange_code(&self, code: &str, redirect_uri: &str) -> ExportResult<String> {
        let params = [
            ("grant_type", "authorization_code"),
            ("client_id", self.credentials.client_id.as_str()),
            ("client_secret", self.credentials.client_secret.as_str()),
            ("code", code),
            ("redirect_uri", redirect_uri),
        ];

        let response = self
            .http_client
            .post(TOKEN_URL)
            .form(&params)
            .send()
            .await
            .map_err(|e| ExportError::Network(format!("token exchange request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExportError::Network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(ExportError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            ExportError::InvalidResponse(format!("invalid token response: {}", e))
        })?;

        info!("exchanged authorization code for access token");
        Ok(token.access_token)
    }
}

/// Token endpoint response.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    #[allow(dead_code)]
    token_type: Option<String>,
}
