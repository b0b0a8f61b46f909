//! Configuration for speech processing

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the local transcoding and recognition tools
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// FFmpeg binary (path or name resolved via PATH)
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,

    /// whisper.cpp CLI binary (path or name resolved via PATH)
    #[serde(default = "default_whisper_path")]
    pub whisper_path: PathBuf,

    /// GGML model file for whisper.cpp
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Worker threads for recognition
    #[serde(default = "default_threads")]
    pub threads: u32,

    /// Spoken-language locale to recognize (ISO 639-1 code)
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg_path(),
            whisper_path: default_whisper_path(),
            model_path: default_model_path(),
            threads: default_threads(),
            language: default_language(),
        }
    }
}

impl SpeechConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.ffmpeg_path.is_empty() {
            return Err("ffmpeg_path must not be empty".to_string());
        }
        if self.whisper_path.as_os_str().is_empty() {
            return Err("whisper_path must not be empty".to_string());
        }
        if self.model_path.as_os_str().is_empty() {
            return Err("model_path must not be empty".to_string());
        }
        if self.threads == 0 {
            return Err("threads must be at least 1".to_string());
        }
        Ok(())
    }
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_whisper_path() -> PathBuf {
    PathBuf::from("whisper-cli")
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/ggml-base.bin")
}

const fn default_threads() -> u32 {
    4
}

fn default_language() -> String {
    "es".to_string()
}
