//! Liveness and health handlers

use axum::{Json, extract::State};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// FFmpeg reachable on this host
    pub transcoder_available: bool,
    /// Recognition engine (binary + model) reachable on this host
    pub recognizer_available: bool,
}

/// Root banner, kept as a quick way to see the bot is up
pub async fn home() -> &'static str {
    "¡Bot Transcriptor Activo!"
}

/// Health check with dependency probes
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        transcoder_available: state.transcoder.is_available().await,
        recognizer_available: state.transcriber.is_available().await,
    })
}
