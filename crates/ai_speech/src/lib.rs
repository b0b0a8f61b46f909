//! AI Speech - audio transcoding and speech-to-text
//!
//! Provides the two stages of the voice-message pipeline:
//! - `AudioTranscoder` - convert downloaded audio into a decodable format
//! - `SpeechToText` - transcribe decoded audio to text (STT)
//!
//! # Architecture
//!
//! This crate follows the ports & adapters pattern:
//! - `ports` module defines the traits (ports)
//! - `converter` and `providers` contain concrete implementations (adapters)
//!
//! Both adapters shell out to local tools (FFmpeg, whisper.cpp) and operate
//! on file paths, matching how media is staged on disk per invocation.

pub mod config;
pub mod converter;
pub mod error;
pub mod ports;
pub mod providers;
pub mod types;

pub use config::SpeechConfig;
pub use converter::FfmpegTranscoder;
pub use error::SpeechError;
pub use ports::{AudioTranscoder, SpeechToText};
pub use providers::whisper_cpp::WhisperCppProvider;
pub use types::Transcription;
