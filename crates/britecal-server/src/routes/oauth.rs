//! OAuth login and callback endpoints.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::Redirect,
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/oauth/login", get(login))
        .route("/oauth/callback", get(callback))
}

/// GET /oauth/login - send the user to the Eventbrite consent page.
async fn login(State(state): State<AppState>) -> Redirect {
    let url = state
        .oauth()
        .authorize_url(&state.eventbrite().redirect_uri);
    Redirect::temporary(&url)
}

#[derive(Debug, Deserialize)]
struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct TokenBody {
    access_token: String,
}

/// GET /oauth/callback - exchange the authorization code for a token.
///
/// The token goes straight back to the caller; nothing is stored
/// server-side.
async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Json<TokenBody>, ApiError> {
    if let Some(error) = params.error {
        return Err(ApiError::bad_request(format!(
            "authorization denied: {}",
            error
        )));
    }

    let code = params
        .code
        .ok_or_else(|| ApiError::bad_request("missing authorization code"))?;

    let access_token = state
        .oauth()
        .exchange_code(&code, &state.eventbrite().redirect_uri)
        .await?;

    Ok(Json(TokenBody { access_token }))
}
