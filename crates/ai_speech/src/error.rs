//! Speech processing errors

use thiserror::Error;

/// Errors that can occur during speech processing
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Audio transcoding/conversion failed
    #[error("Audio processing failed: {0}")]
    AudioProcessing(String),

    /// Transcription failed
    #[error("Transcription failed: {0}")]
    TranscriptionFailed(String),

    /// Recognition engine not reachable (not installed or misconfigured)
    #[error("Recognition engine not available: {0}")]
    NotAvailable(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}
