//! Server configuration, read from the environment once at startup.
//!
//! Configuration is an explicit value constructed in `main` and passed into
//! the router; request handlers never read the environment themselves.

use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use britecal_providers::{EventbriteConfig, OAuthCredentials};

/// Environment variables consumed at startup.
const ENV_BIND_ADDR: &str = "BRITECAL_BIND_ADDR";
const ENV_CLIENT_ID: &str = "EVENTBRITE_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "EVENTBRITE_CLIENT_SECRET";
const ENV_REDIRECT_URI: &str = "EVENTBRITE_REDIRECT_URI";
const ENV_UPSTREAM_TIMEOUT_SECS: &str = "BRITECAL_UPSTREAM_TIMEOUT_SECS";
const ENV_MAX_PAGES: &str = "BRITECAL_MAX_PAGES";

/// Default bind address when [`ENV_BIND_ADDR`] is not set.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Configuration errors surfaced at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    /// An environment variable is set but unusable.
    #[error("invalid value for {var}: {detail}")]
    InvalidVar { var: &'static str, detail: String },
}

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: SocketAddr,
    /// Everything needed to talk to Eventbrite.
    pub eventbrite: EventbriteConfig,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration through an arbitrary lookup, so tests can supply
    /// values without touching the process environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind_addr: SocketAddr = lookup(ENV_BIND_ADDR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidVar {
                var: ENV_BIND_ADDR,
                detail: format!("{}", e),
            })?;

        let client_id = required(&lookup, ENV_CLIENT_ID)?;
        let client_secret = required(&lookup, ENV_CLIENT_SECRET)?;

        let redirect_uri = required(&lookup, ENV_REDIRECT_URI)?;
        Url::parse(&redirect_uri).map_err(|e| ConfigError::InvalidVar {
            var: ENV_REDIRECT_URI,
            detail: format!("{}", e),
        })?;

        let mut eventbrite = EventbriteConfig::new(
            OAuthCredentials::new(client_id, client_secret),
            redirect_uri,
        );

        if let Some(raw) = lookup(ENV_UPSTREAM_TIMEOUT_SECS) {
            let secs: u64 = raw.parse().map_err(|e| ConfigError::InvalidVar {
                var: ENV_UPSTREAM_TIMEOUT_SECS,
                detail: format!("{}", e),
            })?;
            eventbrite = eventbrite.with_timeout(Duration::from_secs(secs));
        }

        if let Some(raw) = lookup(ENV_MAX_PAGES) {
            let max_pages: usize = raw.parse().map_err(|e| ConfigError::InvalidVar {
                var: ENV_MAX_PAGES,
                detail: format!("{}", e),
            })?;
            eventbrite = eventbrite.with_max_pages(max_pages);
        }

        Ok(Self {
            bind_addr,
            eventbrite,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    lookup(var)
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingVar(var))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            (ENV_CLIENT_ID, "client-id"),
            (ENV_CLIENT_SECRET, "client-secret"),
            (ENV_REDIRECT_URI, "https://app.example.com/oauth/callback"),
        ])
    }

    fn from_map(env: &HashMap<&str, &str>) -> Result<ServerConfig, ConfigError> {
        ServerConfig::from_lookup(|var| env.get(var).map(|v| v.to_string()))
    }

    #[test]
    fn minimal_config_uses_defaults() {
        let config = from_map(&base_env()).unwrap();
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.eventbrite.timeout, Duration::from_secs(30));
        assert_eq!(config.eventbrite.credentials.client_id, "client-id");
    }

    #[test]
    fn overrides_are_applied() {
        let mut env = base_env();
        env.insert(ENV_BIND_ADDR, "0.0.0.0:9000");
        env.insert(ENV_UPSTREAM_TIMEOUT_SECS, "5");
        env.insert(ENV_MAX_PAGES, "10");

        let config = from_map(&env).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.eventbrite.timeout, Duration::from_secs(5));
        assert_eq!(config.eventbrite.max_pages, 10);
    }

    #[test]
    fn missing_client_secret_is_an_error() {
        let mut env = base_env();
        env.remove(ENV_CLIENT_SECRET);
        assert!(matches!(
            from_map(&env).unwrap_err(),
            ConfigError::MissingVar(var) if var == ENV_CLIENT_SECRET
        ));
    }

    #[test]
    fn blank_required_value_counts_as_missing() {
        let mut env = base_env();
        env.insert(ENV_CLIENT_ID, "   ");
        assert!(matches!(
            from_map(&env).unwrap_err(),
            ConfigError::MissingVar(var) if var == ENV_CLIENT_ID
        ));
    }

    #[test]
    fn invalid_redirect_uri_is_rejected() {
        let mut env = base_env();
        env.insert(ENV_REDIRECT_URI, "not a url");
        assert!(matches!(
            from_map(&env).unwrap_err(),
            ConfigError::InvalidVar { var, .. } if var == ENV_REDIRECT_URI
        ));
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let mut env = base_env();
        env.insert(ENV_UPSTREAM_TIMEOUT_SECS, "soon");
        assert!(matches!(
            from_map(&env).unwrap_err(),
            ConfigError::InvalidVar { var, .. } if var == ENV_UPSTREAM_TIMEOUT_SECS
        ));
    }
}
