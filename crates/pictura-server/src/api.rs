use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use pictura_session::{Session, SessionSnapshot};
use serde::Deserialize;
use tracing::Instrument;

use crate::error::ApiError;

/// Shared state for the API handlers
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<Session>,
}

/// Form submission body
///
/// Not `Debug`: it carries the credential in the clear.
#[derive(Deserialize)]
pub struct GenerateBody {
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    api_key: String,
}

/// Start a generation attempt
///
/// Responds as soon as the session is in flight; the page polls
/// `/api/session` for the outcome.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateBody>, JsonRejection>,
) -> Result<(StatusCode, Json<SessionSnapshot>), ApiError> {
    let Json(body) = payload?;
    let attempt = state.session.begin(&body.prompt, &body.api_key)?;
    let snapshot = state.session.snapshot();

    tokio::spawn(attempt.run().instrument(tracing::info_span!("generation")));

    Ok((StatusCode::ACCEPTED, Json(snapshot)))
}

/// Current session state for rendering
pub async fn session(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-store")],
        Json(state.session.snapshot()),
    )
}

/// Download the current image as a JPEG attachment
pub async fn download(State(state): State<AppState>) -> Result<Response, ApiError> {
    let download = state
        .session
        .download()
        .map_err(|e| {
            tracing::error!(error = %e, "stored image could not be decoded");
            ApiError::Internal
        })?
        .ok_or(ApiError::NoImage)?;

    tracing::debug!(filename = %download.filename, bytes = download.bytes.len(), "serving image download");

    Ok((
        [
            (header::CONTENT_TYPE, download.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", download.filename),
            ),
        ],
        download.bytes,
    )
        .into_response())
}
