//! WhatsApp webhook handlers
//!
//! Handles the platform handshake (GET) and incoming message events (POST).
//! Text messages get an echo acknowledgment; audio messages run through the
//! download, transcode and transcribe pipeline before a reply is sent.
//!
//! The event path always answers 200 with a fixed acknowledgment body: the
//! platform expects a prompt 2xx regardless of processing outcome, otherwise
//! it redelivers the event.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use ai_speech::SpeechError;
use integration_whatsapp::{IncomingMessage, MediaHandle, WebhookPayload, extract_first_message};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::state::AppState;

/// Fixed acknowledgment returned on every event-path request
pub const ACK_BODY: &str = "Evento recibido";

/// Fixed body returned when the handshake token does not match
pub const VERIFY_ERROR_BODY: &str = "Error de validación";

/// Reply when the media download fails
pub const DOWNLOAD_ERROR_REPLY: &str = "Error: No pude descargar el audio.";

/// Reply when audio decodes but no speech is recognized
pub const UNINTELLIGIBLE_REPLY: &str = "No pude entender lo que se dijo en el audio.";

/// Reply when the recognition engine is unreachable
pub const RECOGNIZER_UNREACHABLE_REPLY: &str =
    "Error de conexión con el servicio de reconocimiento de voz.";

/// Prefix of a successful transcription reply
pub const TRANSCRIPTION_PREFIX: &str = "📝 Transcripción: ";

/// Query parameters for webhook verification
#[derive(Debug, Deserialize)]
pub struct WebhookVerifyQuery {
    /// The verify token to validate
    #[serde(rename = "hub.verify_token")]
    pub hub_verify_token: Option<String>,
    /// The challenge to echo back on success
    #[serde(rename = "hub.challenge")]
    pub hub_challenge: Option<String>,
}

/// WhatsApp webhook verification (GET)
///
/// Meta sends a GET request to verify webhook ownership during setup. The
/// exchange is fixed by the platform: token match echoes the challenge,
/// anything else is a 403.
#[instrument(skip(state, query))]
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(query): Query<WebhookVerifyQuery>,
) -> impl IntoResponse {
    if query.hub_verify_token.as_deref() == Some(state.config.verify_token.as_str()) {
        info!("Webhook verified successfully");
        (StatusCode::OK, query.hub_challenge.unwrap_or_default())
    } else {
        warn!("Webhook verification failed: token mismatch");
        (StatusCode::FORBIDDEN, VERIFY_ERROR_BODY.to_string())
    }
}

/// WhatsApp webhook event handler (POST)
#[instrument(skip(state, body))]
pub async fn handle_webhook(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    match serde_json::from_slice::<WebhookPayload>(&body) {
        Ok(payload) => match extract_first_message(&payload) {
            Some(message) => dispatch_message(&state, message).await,
            None => debug!("No message in webhook payload (status update or receipt)"),
        },
        // Malformed body: reported here, never surfaced to the platform
        Err(e) => error!(error = %e, "Failed to parse webhook payload"),
    }

    (StatusCode::OK, ACK_BODY)
}

/// Branch on the normalized message kind
async fn dispatch_message(state: &AppState, message: IncomingMessage) {
    match message {
        IncomingMessage::Text {
            from,
            message_id,
            body,
        } => {
            info!(from = %from, message_id = %message_id, "Text message received");
            send_reply(state, &from, &format!("Dijiste: {body}")).await;
        },
        IncomingMessage::Audio {
            from,
            message_id,
            media_id,
        } => {
            info!(
                from = %from,
                message_id = %message_id,
                media_id = %media_id,
                "Audio message received, processing"
            );
            handle_audio_message(state, &from, &media_id).await;
        },
        IncomingMessage::Unsupported { from, msg_type } => {
            debug!(from = %from, msg_type = %msg_type, "Ignoring unsupported message type");
        },
    }
}

/// Run the audio pipeline for one voice message and reply with the outcome.
///
/// The `MediaHandle` owns both temporary files; dropping it at the end of
/// this function deletes them no matter where the pipeline stopped.
async fn handle_audio_message(state: &AppState, from: &str, media_id: &str) {
    let mut handle = match state.whatsapp.fetch_media(media_id).await {
        Ok(handle) => handle,
        Err(e) => {
            error!(error = %e, media_id = %media_id, "Failed to download audio");
            send_reply(state, from, DOWNLOAD_ERROR_REPLY).await;
            return;
        },
    };

    let reply = transcription_reply(state, &mut handle).await;
    send_reply(state, from, &reply).await;

    drop(handle);
}

/// Transcode and transcribe, mapping every failure to a user-facing string.
async fn transcription_reply(state: &AppState, handle: &mut MediaHandle) -> String {
    // Transcoding failures ride the same user-facing error path as other
    // processing failures
    let decoded = match state.transcoder.transcode_to_wav(handle.raw_path()).await {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "Audio transcoding failed");
            return processing_error_reply(&e);
        },
    };
    handle.set_decoded(decoded.clone());

    match state.transcriber.transcribe(&decoded).await {
        Ok(transcription) if transcription.is_empty() => {
            info!("No recognizable speech in audio");
            UNINTELLIGIBLE_REPLY.to_string()
        },
        Ok(transcription) => {
            info!(len = transcription.text.len(), "Transcription successful");
            format!("{TRANSCRIPTION_PREFIX}{}", transcription.text)
        },
        Err(e @ SpeechError::NotAvailable(_)) => {
            error!(error = %e, "Recognition engine unreachable");
            RECOGNIZER_UNREACHABLE_REPLY.to_string()
        },
        Err(e) => {
            error!(error = %e, "Transcription failed");
            processing_error_reply(&e)
        },
    }
}

fn processing_error_reply(error: &SpeechError) -> String {
    format!("Error procesando el audio: {error}")
}

/// Best-effort send: failures are logged and swallowed, never propagated.
async fn send_reply(state: &AppState, to: &str, text: &str) {
    if let Err(e) = state.whatsapp.send_message(to, text).await {
        error!(error = %e, to = %to, "Failed to send WhatsApp reply");
    }
}
