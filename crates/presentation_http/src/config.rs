//! Application configuration
//!
//! Loaded once at startup and passed by reference into the handlers; there
//! is no ambient global lookup. The platform credentials are required and
//! their absence fails startup instead of producing silent authorization
//! failures downstream.

use ai_speech::SpeechConfig;
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Meta Graph API access token (required)
    #[serde(default)]
    pub access_token: String,

    /// WhatsApp Business phone number id (required)
    #[serde(default)]
    pub phone_number_id: String,

    /// Webhook handshake verification token (required)
    #[serde(default)]
    pub verify_token: String,

    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Graph API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Graph API base URL
    #[serde(default = "default_graph_base_url")]
    pub graph_base_url: String,

    /// Speech processing configuration
    #[serde(default)]
    pub speech: SpeechConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    3000
}

fn default_api_version() -> String {
    "v22.0".to_string()
}

fn default_graph_base_url() -> String {
    "https://graph.facebook.com".to_string()
}

impl AppConfig {
    /// Load configuration from the environment and an optional file.
    ///
    /// Environment variables (`ACCESS_TOKEN`, `PHONE_NUMBER_ID`,
    /// `VERIFY_TOKEN`, `HOST`, `PORT`, ...) override values from an
    /// optional `config.*` file next to the binary.
    pub fn load() -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::default().try_parsing(true));

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Fail fast on missing credentials.
    fn validate(&self) -> Result<(), config::ConfigError> {
        for (value, name) in [
            (&self.access_token, "ACCESS_TOKEN"),
            (&self.phone_number_id, "PHONE_NUMBER_ID"),
            (&self.verify_token, "VERIFY_TOKEN"),
        ] {
            if value.is_empty() {
                return Err(config::ConfigError::Message(format!(
                    "{name} is required but not set"
                )));
            }
        }
        Ok(())
    }
}
