//! WhatsApp integration
//!
//! Handles WhatsApp Business API webhook payloads, message sending and
//! media retrieval via the Meta Graph API.

pub mod client;
pub mod media;
pub mod webhook;

pub use client::{WhatsAppClient, WhatsAppClientConfig, WhatsAppError};
pub use media::MediaHandle;
pub use webhook::{IncomingMessage, WebhookPayload, extract_first_message};
