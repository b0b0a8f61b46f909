//! WhatsApp client for sending messages and fetching media
//!
//! Uses the Meta Graph API. Media retrieval is the two-step Graph flow:
//! resolve the media id to a short-lived signed URL, then download the bytes.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::media::MediaHandle;

const SEND_TIMEOUT: Duration = Duration::from_secs(30);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// WhatsApp API errors
#[derive(Debug, Error)]
pub enum WhatsAppError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {code} - {message}")]
    Api { code: i32, message: String },

    #[error("Missing configuration: {0}")]
    Configuration(String),

    #[error("Media metadata for {0} contained no download URL")]
    MediaNotFound(String),

    #[error("Media download failed: {0}")]
    MediaDownloadFailed(String),
}

/// WhatsApp client configuration
#[derive(Debug, Clone)]
pub struct WhatsAppClientConfig {
    /// Meta Graph API access token
    pub access_token: String,
    /// Phone number ID from WhatsApp Business
    pub phone_number_id: String,
    /// API version (default: v22.0)
    pub api_version: String,
    /// Graph API base URL, overridable for tests (default: https://graph.facebook.com)
    pub graph_base_url: String,
}

impl Default for WhatsAppClientConfig {
    fn default() -> Self {
        Self {
            access_token: String::new(),
            phone_number_id: String::new(),
            api_version: "v22.0".to_string(),
            graph_base_url: "https://graph.facebook.com".to_string(),
        }
    }
}

/// WhatsApp client for the Meta Graph API
#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    client: Client,
    config: WhatsAppClientConfig,
    graph_url: String,
}

/// Message send request
#[derive(Debug, Serialize)]
struct SendMessageRequest {
    messaging_product: &'static str,
    to: String,
    #[serde(rename = "type")]
    msg_type: &'static str,
    text: TextContent,
}

#[derive(Debug, Serialize)]
struct TextContent {
    body: String,
}

/// API response for sent message
#[derive(Debug, Deserialize)]
pub struct SendMessageResponse {
    pub messaging_product: String,
    #[serde(default)]
    pub messages: Vec<MessageInfo>,
}

#[derive(Debug, Deserialize)]
pub struct MessageInfo {
    pub id: String,
}

/// Media metadata response (step one of a download)
#[derive(Debug, Deserialize)]
struct MediaUrlResponse {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
}

/// API error response
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    code: i32,
    message: String,
}

impl WhatsAppClient {
    /// Create a new WhatsApp client
    pub fn new(config: WhatsAppClientConfig) -> Result<Self, WhatsAppError> {
        if config.access_token.is_empty() {
            return Err(WhatsAppError::Configuration(
                "access_token is required".to_string(),
            ));
        }
        if config.phone_number_id.is_empty() {
            return Err(WhatsAppError::Configuration(
                "phone_number_id is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| WhatsAppError::Configuration(format!("HTTP client: {e}")))?;

        let graph_url = format!(
            "{}/{}",
            config.graph_base_url.trim_end_matches('/'),
            config.api_version
        );

        Ok(Self {
            client,
            config,
            graph_url,
        })
    }

    /// Send a text message.
    ///
    /// Best-effort contract: replies in this system are fire-and-forget, so
    /// callers are expected to log a returned error and move on, never to
    /// retry or block on it.
    #[instrument(skip(self, message), fields(to = %to))]
    pub async fn send_message(
        &self,
        to: &str,
        message: &str,
    ) -> Result<SendMessageResponse, WhatsAppError> {
        let request = SendMessageRequest {
            messaging_product: "whatsapp",
            to: to.to_string(),
            msg_type: "text",
            text: TextContent {
                body: message.to_string(),
            },
        };

        debug!(message_len = message.len(), "Sending WhatsApp message");

        let response = self
            .client
            .post(format!(
                "{}/{}/messages",
                self.graph_url, self.config.phone_number_id
            ))
            .bearer_auth(&self.config.access_token)
            .json(&request)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            let error: ApiErrorResponse = response.json().await?;
            Err(WhatsAppError::Api {
                code: error.error.code,
                message: error.error.message,
            })
        }
    }

    /// Download a media object to a temporary file.
    ///
    /// Resolves the opaque media id to a signed URL via the Graph metadata
    /// endpoint, fetches the bytes and stages them in the system temp
    /// directory, keyed by the media id so concurrent downloads never
    /// collide. The returned [`MediaHandle`] deletes the file on drop.
    #[instrument(skip(self), fields(media_id = %media_id))]
    pub async fn fetch_media(&self, media_id: &str) -> Result<MediaHandle, WhatsAppError> {
        let metadata_response = self
            .client
            .get(format!("{}/{}", self.graph_url, media_id))
            .bearer_auth(&self.config.access_token)
            .send()
            .await?;

        if !metadata_response.status().is_success() {
            let status = metadata_response.status();
            return Err(match metadata_response.json::<ApiErrorResponse>().await {
                Ok(error) => WhatsAppError::Api {
                    code: error.error.code,
                    message: error.error.message,
                },
                Err(_) => {
                    WhatsAppError::MediaDownloadFailed(format!("metadata lookup returned {status}"))
                },
            });
        }

        let metadata: MediaUrlResponse = metadata_response.json().await?;
        let url = metadata
            .url
            .ok_or_else(|| WhatsAppError::MediaNotFound(media_id.to_string()))?;

        debug!(mime_type = ?metadata.mime_type, "Resolved media download URL");

        let download_response = self
            .client
            .get(&url)
            .bearer_auth(&self.config.access_token)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await?;

        if !download_response.status().is_success() {
            return Err(WhatsAppError::MediaDownloadFailed(format!(
                "download returned {}",
                download_response.status()
            )));
        }

        let bytes = download_response.bytes().await?;
        let path = std::env::temp_dir().join(format!("wa_media_{media_id}.ogg"));

        // Handle first: a failed write drops it and removes the partial file
        let handle = MediaHandle::new(path);
        tokio::fs::write(handle.raw_path(), &bytes)
            .await
            .map_err(|e| WhatsAppError::MediaDownloadFailed(format!("write temp file: {e}")))?;

        debug!(
            size = bytes.len(),
            path = %handle.raw_path().display(),
            "Downloaded media to temporary file"
        );

        Ok(handle)
    }
}
