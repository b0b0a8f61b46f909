//! Whisper.cpp local speech-to-text provider
//!
//! Implements `SpeechToText` using the whisper.cpp CLI for local
//! transcription.
//!
//! # Prerequisites
//!
//! - whisper.cpp must be installed and available in PATH
//! - A GGML model file (e.g., ggml-base.bin, ggml-small.bin)

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error, instrument, warn};

use crate::config::SpeechConfig;
use crate::error::SpeechError;
use crate::ports::SpeechToText;
use crate::types::Transcription;

/// Local STT provider using whisper.cpp
#[derive(Debug, Clone)]
pub struct WhisperCppProvider {
    config: SpeechConfig,
}

impl WhisperCppProvider {
    /// Create a new whisper.cpp provider
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::Configuration` if the configuration is invalid.
    pub fn new(config: SpeechConfig) -> Result<Self, SpeechError> {
        config.validate().map_err(SpeechError::Configuration)?;
        Ok(Self { config })
    }

    fn executable(&self) -> &Path {
        &self.config.whisper_path
    }

    fn model(&self) -> &Path {
        &self.config.model_path
    }

    /// Run whisper.cpp on a decoded WAV file and return the recognized text
    #[instrument(skip(self, audio_path), fields(model = %self.model().display()))]
    async fn run_whisper(&self, audio_path: &Path) -> Result<String, SpeechError> {
        // -of sets the output base so the .txt lands at a known path
        let output_base = audio_path.with_extension("");

        let output = Command::new(self.executable())
            .arg("-m")
            .arg(self.model())
            .arg("-f")
            .arg(audio_path)
            .arg("--output-txt")
            .arg("--no-timestamps")
            .arg("-l")
            .arg(&self.config.language)
            .arg("-t")
            .arg(self.config.threads.to_string())
            .arg("-of")
            .arg(&output_base)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SpeechError::NotAvailable(format!(
                        "whisper.cpp not found at '{}'",
                        self.executable().display()
                    ))
                } else {
                    SpeechError::TranscriptionFailed(format!("Failed to run whisper.cpp: {e}"))
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("whisper.cpp failed: {}", stderr.trim());
            return Err(SpeechError::TranscriptionFailed(format!(
                "whisper.cpp exited with status {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let txt_path = output_base.with_extension("txt");
        let text = tokio::fs::read_to_string(&txt_path).await.map_err(|e| {
            SpeechError::TranscriptionFailed(format!("Failed to read transcription output: {e}"))
        })?;

        // Clean up whisper's output file
        let _ = tokio::fs::remove_file(&txt_path).await;

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl SpeechToText for WhisperCppProvider {
    #[instrument(skip(self, audio_path), fields(language = %self.config.language))]
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcription, SpeechError> {
        debug!(path = %audio_path.display(), "Transcribing audio with whisper.cpp");

        let text = self.run_whisper(audio_path).await?;

        if text.is_empty() {
            warn!("whisper.cpp returned empty transcription");
        }

        Ok(Transcription::new(text).with_language(&self.config.language))
    }

    async fn is_available(&self) -> bool {
        let executable_exists = self.executable().exists() || {
            // Try to resolve via PATH
            Command::new(self.executable())
                .arg("--help")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .await
                .map(|s| s.success())
                .unwrap_or(false)
        };

        let model_exists = self.model().exists();

        debug!(
            "whisper.cpp availability: executable={}, model={}",
            executable_exists, model_exists
        );

        executable_exists && model_exists
    }
}
