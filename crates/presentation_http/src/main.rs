//! Transcription relay HTTP server
//!
//! Main entry point: loads configuration, wires the WhatsApp client and the
//! speech pipeline, and serves the webhook endpoint.

use std::sync::Arc;

use ai_speech::{FfmpegTranscoder, SpeechToText, WhisperCppProvider};
use integration_whatsapp::{WhatsAppClient, WhatsAppClientConfig};
use presentation_http::{AppConfig, AppState, create_router};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transcriptor_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🤖 Transcriptor v{} starting...", env!("CARGO_PKG_VERSION"));

    // Required credentials missing -> refuse to start
    let config = AppConfig::load()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {e}"))?;

    info!(
        host = %config.host,
        port = %config.port,
        api_version = %config.api_version,
        language = %config.speech.language,
        "Configuration loaded"
    );

    let whatsapp = WhatsAppClient::new(WhatsAppClientConfig {
        access_token: config.access_token.clone(),
        phone_number_id: config.phone_number_id.clone(),
        api_version: config.api_version.clone(),
        graph_base_url: config.graph_base_url.clone(),
    })
    .map_err(|e| anyhow::anyhow!("Failed to create WhatsApp client: {e}"))?;

    let transcoder = FfmpegTranscoder::new(config.speech.ffmpeg_path.clone());
    let transcriber = WhisperCppProvider::new(config.speech.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create transcriber: {e}"))?;

    if !transcriber.is_available().await {
        warn!("Recognition engine not reachable yet; audio messages will get error replies");
    }

    let state = AppState {
        config: Arc::new(config.clone()),
        whatsapp: Arc::new(whatsapp),
        transcoder: Arc::new(transcoder),
        transcriber: Arc::new(transcriber),
    };

    let app = create_router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("🚀 Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("📥 Received Ctrl+C, shutting down...");
        }
        () = terminate => {
            info!("📥 Received SIGTERM, shutting down...");
        }
    }
}
