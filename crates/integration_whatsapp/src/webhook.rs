//! WhatsApp webhook payload parsing
//!
//! Decodes the nested event envelope delivered by the WhatsApp Business API
//! into a normalized incoming message.

use serde::Deserialize;

/// WhatsApp webhook envelope
///
/// Every collection and nested object defaults to empty: the platform also
/// delivers non-message notifications (delivery receipts, read statuses)
/// that omit parts of this structure, and those must parse cleanly.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub object: String,
    #[serde(default)]
    pub entry: Vec<WebhookEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub changes: Vec<WebhookChange>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookChange {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub value: WebhookValue,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookValue {
    #[serde(default)]
    pub messaging_product: String,
    #[serde(default)]
    pub messages: Vec<WebhookMessage>,
    #[serde(default)]
    pub statuses: Vec<WebhookStatus>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebhookMessage {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(rename = "type", default)]
    pub msg_type: String,
    #[serde(default)]
    pub text: Option<TextMessage>,
    #[serde(default)]
    pub audio: Option<AudioMessage>,
}

#[derive(Debug, Deserialize)]
pub struct TextMessage {
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct AudioMessage {
    pub id: String,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub voice: bool,
}

/// Delivery/read status notification (ignored, parsed so the envelope is valid)
#[derive(Debug, Default, Deserialize)]
pub struct WebhookStatus {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub recipient_id: String,
}

/// Normalized incoming message extracted from a webhook envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomingMessage {
    /// Text message
    Text {
        from: String,
        message_id: String,
        body: String,
    },
    /// Audio/voice message referencing platform-hosted media
    Audio {
        from: String,
        message_id: String,
        media_id: String,
    },
    /// Recognized envelope but unsupported message type (image, sticker, ...)
    Unsupported { from: String, msg_type: String },
}

impl IncomingMessage {
    /// Get the sender identifier
    #[must_use]
    pub fn from(&self) -> &str {
        match self {
            Self::Text { from, .. } | Self::Audio { from, .. } | Self::Unsupported { from, .. } => {
                from
            },
        }
    }

    /// Check if this is a text message
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }

    /// Check if this is an audio message
    #[must_use]
    pub const fn is_audio(&self) -> bool {
        matches!(self, Self::Audio { .. })
    }
}

/// Extract the first message from a webhook envelope.
///
/// Returns `None` when the payload carries no message (status updates and
/// other notifications). Message types other than `text` and `audio` come
/// back as [`IncomingMessage::Unsupported`]. A `text` or `audio` message
/// missing its typed body is treated as unsupported as well.
#[must_use]
pub fn extract_first_message(payload: &WebhookPayload) -> Option<IncomingMessage> {
    let message = payload
        .entry
        .first()?
        .changes
        .first()?
        .value
        .messages
        .first()?;

    let parsed = match message.msg_type.as_str() {
        "text" => message.text.as_ref().map(|text| IncomingMessage::Text {
            from: message.from.clone(),
            message_id: message.id.clone(),
            body: text.body.clone(),
        }),
        "audio" => message.audio.as_ref().map(|audio| IncomingMessage::Audio {
            from: message.from.clone(),
            message_id: message.id.clone(),
            media_id: audio.id.clone(),
        }),
        _ => None,
    };

    Some(parsed.unwrap_or_else(|| IncomingMessage::Unsupported {
        from: message.from.clone(),
        msg_type: message.msg_type.clone(),
    }))
}
