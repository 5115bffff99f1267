//! britecal export server.
//!
//! Thin HTTP boundary around the export pipeline: OAuth login/callback plus
//! the `/export` download route. All state is immutable configuration
//! constructed once here and shared through [`AppState`].

mod config;
mod error;
mod routes;
mod state;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use britecal_core::tracing::{TracingConfig, init_tracing};

use crate::config::ServerConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing(TracingConfig::server())?;

    let config = ServerConfig::from_env()?;
    let state = AppState::new(config.eventbrite.clone());

    // Browser clients hit the download route directly from other origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .merge(routes::oauth::router())
        .merge(routes::export::router())
        .with_state(state)
        .layer(cors);

    info!(addr = %config.bind_addr, "britecal server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
