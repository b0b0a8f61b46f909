//! Port definitions for speech processing
//!
//! Defines the traits (ports) that the pipeline adapters implement. The
//! webhook dispatcher depends on these, never on a concrete tool, so tests
//! can substitute both stages.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::SpeechError;
use crate::types::Transcription;

/// Port for audio format conversion
///
/// Converts a compressed source file (WhatsApp delivers OGG/Opus) into a
/// WAV file the recognition engine can consume.
#[async_trait]
pub trait AudioTranscoder: Send + Sync {
    /// Transcode the file at `input` to 16 kHz mono PCM WAV.
    ///
    /// Returns the path of the decoded file. The caller owns both files and
    /// is responsible for their cleanup.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::AudioProcessing` when the tool is missing, the
    /// input is corrupt or the conversion fails. On failure no output file
    /// is left behind: the caller only learns the output path on success,
    /// so a partial file would be unreachable for cleanup.
    async fn transcode_to_wav(&self, input: &Path) -> Result<PathBuf, SpeechError>;

    /// Check if the transcoding tool is available
    async fn is_available(&self) -> bool;
}

/// Port for Speech-to-Text (STT) implementations
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe the decoded audio file at `audio_path` to text.
    ///
    /// Blocking from the caller's perspective: the future resolves only
    /// once recognition finished. No retry is attempted.
    ///
    /// # Errors
    ///
    /// Returns `SpeechError::NotAvailable` when the engine cannot be
    /// reached and `SpeechError::TranscriptionFailed` for other failures.
    /// Unintelligible audio is not an error: it yields a transcription
    /// whose text is empty.
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcription, SpeechError>;

    /// Check if the STT engine is available
    async fn is_available(&self) -> bool;
}
