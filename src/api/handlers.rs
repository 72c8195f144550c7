use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use super::{HealthResponse, SynthesisRequest};
use crate::api::routes::AppState;
use crate::error::AppError;

/// Audio is keyed by its full request signature, so clients may hold on to it.
const AUDIO_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

pub async fn tts(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SynthesisRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = payload?;

    let audio = state
        .relay
        .synthesize(
            request.text.as_deref(),
            request.voice_id.as_deref(),
            request.voice_settings(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "audio/mpeg"),
            (header::CACHE_CONTROL, AUDIO_CACHE_CONTROL),
        ],
        audio,
    )
        .into_response())
}

pub async fn ping() -> &'static str {
    "ok"
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cached_entries: state.relay.cached_entries(),
    })
}
