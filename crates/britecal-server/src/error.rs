//! Error mapping from the export pipeline to HTTP responses.
//!
//! Every failing route returns a JSON body with a machine-readable kind and
//! a human-readable detail; a partially built calendar is never sent.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::warn;

use britecal_providers::ExportError;

/// JSON payload for error responses.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    detail: String,
}

/// An error leaving the HTTP boundary.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    detail: String,
}

impl ApiError {
    /// A 400 response for malformed client input.
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "bad_request",
            detail: detail.into(),
        }
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The machine-readable kind placed in the response body.
    pub fn kind(&self) -> &'static str {
        self.kind
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        let status = match &err {
            // The upstream status is passed through; anything that does not
            // name a valid status degrades to a bad-gateway.
            ExportError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ExportError::Network(_)
            | ExportError::InvalidResponse(_)
            | ExportError::PaginationLimitExceeded { .. } => StatusCode::BAD_GATEWAY,
            // "Nothing to export" is the caller's situation, not an outage.
            ExportError::EmptyBatch | ExportError::NoValidEvents { .. } => StatusCode::NOT_FOUND,
        };

        Self {
            status,
            kind: err.kind(),
            detail: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(kind = self.kind, status = %self.status, detail = %self.detail, "request failed");
        (
            self.status,
            Json(ErrorBody {
                error: self.kind,
                detail: self.detail,
            }),
        )
            .into_response()
    }
}
