//! Calendar export endpoint.

use axum::{
    Json, Router,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::Deserialize;
use tracing::info;

use britecal_core::{CALENDAR_FILENAME, CALENDAR_MIME_TYPE, encode_calendar};
use britecal_providers::{EventbriteClient, build_batch};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/export", post(export))
}

#[derive(Debug, Deserialize)]
struct ExportRequest {
    access_token: String,
}

/// POST /export - aggregate the user's orders and stream the calendar back
/// as a file download.
///
/// The response is either a complete, valid document or a structured error
/// from [`ApiError`]; never a mix.
async fn export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, ApiError> {
    if request.access_token.trim().is_empty() {
        return Err(ApiError::bad_request("access_token must not be empty"));
    }

    let config = state.eventbrite();
    let client = EventbriteClient::new(request.access_token, config.timeout);
    let batch = build_batch(&client, config.max_pages).await?;

    info!(
        events = batch.len(),
        skipped = batch.skipped,
        "exporting calendar"
    );

    let document = encode_calendar(&batch.events);
    let headers = [
        (header::CONTENT_TYPE, CALENDAR_MIME_TYPE.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", CALENDAR_FILENAME),
        ),
    ];

    Ok((headers, document).into_response())
}
