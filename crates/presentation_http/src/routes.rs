//! Route definitions

use axum::{
    Router,
    routing::get,
};

use crate::{handlers, state::AppState};

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::home))
        .route("/health", get(handlers::health::health_check))
        // WhatsApp webhook: GET is the platform handshake, POST delivers events
        .route(
            "/webhook",
            get(handlers::webhook::verify_webhook).post(handlers::webhook::handle_webhook),
        )
        .with_state(state)
}
