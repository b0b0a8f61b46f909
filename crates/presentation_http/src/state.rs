//! Application state shared across handlers

use std::sync::Arc;

use ai_speech::{AudioTranscoder, SpeechToText};
use integration_whatsapp::WhatsAppClient;

use crate::config::AppConfig;

/// Shared application state
///
/// Everything in here is constructed once at startup and immutable
/// afterwards; handler invocations share nothing else.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// WhatsApp client for sending replies and fetching media
    pub whatsapp: Arc<WhatsAppClient>,
    /// Audio transcoder (OGG/Opus to WAV)
    pub transcoder: Arc<dyn AudioTranscoder>,
    /// Speech-to-text engine
    pub transcriber: Arc<dyn SpeechToText>,
}
