//! HTTP presentation layer for the WhatsApp transcription relay
//!
//! Exposes the webhook endpoint, health routes and the application state
//! wiring used by the server binary.

pub mod config;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::AppConfig;
pub use routes::create_router;
pub use state::AppState;
