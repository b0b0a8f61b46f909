//! Audio format converter
//!
//! Converts WhatsApp's OGG/Opus voice notes into WAV for the recognition
//! engine. Uses FFmpeg, which must be installed on the system.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::error::SpeechError;
use crate::ports::AudioTranscoder;

/// FFmpeg-backed transcoder
#[derive(Debug, Clone)]
pub struct FfmpegTranscoder {
    ffmpeg_path: String,
}

impl Default for FfmpegTranscoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl FfmpegTranscoder {
    /// Create a transcoder using the given FFmpeg binary (path or name in PATH)
    #[must_use]
    pub fn new(ffmpeg_path: impl Into<String>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
        }
    }
}

#[async_trait]
impl AudioTranscoder for FfmpegTranscoder {
    /// Check if FFmpeg is available on the system
    #[instrument(skip(self))]
    async fn is_available(&self) -> bool {
        Command::new(&self.ffmpeg_path)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .is_ok_and(|status| status.success())
    }

    #[instrument(skip(self), fields(input = %input.display()))]
    async fn transcode_to_wav(&self, input: &Path) -> Result<PathBuf, SpeechError> {
        let output = input.with_extension("wav");

        // PCM 16-bit, mono, 16kHz: the layout speech recognition expects
        let result = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(input)
            .args(["-codec:a", "pcm_s16le", "-ar", "16000", "-ac", "1"])
            .arg("-y")
            .args(["-loglevel", "error"])
            .arg(&output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| SpeechError::AudioProcessing(format!("Failed to spawn FFmpeg: {e}")))?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            // FFmpeg can die mid-encode and leave a partial output behind
            let _ = tokio::fs::remove_file(&output).await;
            return Err(SpeechError::AudioProcessing(format!(
                "FFmpeg conversion failed: {}",
                stderr.trim()
            )));
        }

        debug!(output = %output.display(), "Conversion successful");
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_path_lookup() {
        let converter = FfmpegTranscoder::default();
        assert_eq!(converter.ffmpeg_path, "ffmpeg");
    }

    #[test]
    fn custom_binary_path() {
        let converter = FfmpegTranscoder::new("/usr/local/bin/ffmpeg");
        assert_eq!(converter.ffmpeg_path, "/usr/local/bin/ffmpeg");
    }

    #[tokio::test]
    async fn is_available_returns_false_for_invalid_path() {
        let converter = FfmpegTranscoder::new("/nonexistent/path/to/ffmpeg");
        assert!(!converter.is_available().await);
    }

    #[tokio::test]
    async fn transcode_fails_with_invalid_ffmpeg() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("voice.ogg");
        std::fs::write(&input, b"not real audio").unwrap();

        let converter = FfmpegTranscoder::new("/nonexistent/ffmpeg");
        let result = converter.transcode_to_wav(&input).await;

        assert!(matches!(result, Err(SpeechError::AudioProcessing(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn partial_output_is_removed_when_ffmpeg_dies_mid_encode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("voice.ogg");
        std::fs::write(&input, b"OggS junk").unwrap();

        // Stands in for an ffmpeg that writes its output and then crashes;
        // the output path is the last argument
        let fake_ffmpeg = dir.path().join("fake-ffmpeg");
        std::fs::write(
            &fake_ffmpeg,
            "#!/bin/sh\nfor arg; do out=\"$arg\"; done\ntouch \"$out\"\nexit 1\n",
        )
        .unwrap();
        std::fs::set_permissions(&fake_ffmpeg, std::fs::Permissions::from_mode(0o755)).unwrap();

        let converter = FfmpegTranscoder::new(fake_ffmpeg.to_str().unwrap());
        let result = converter.transcode_to_wav(&input).await;

        assert!(matches!(result, Err(SpeechError::AudioProcessing(_))));
        assert!(!input.with_extension("wav").exists());
    }

    #[tokio::test]
    async fn output_path_swaps_extension() {
        // Only exercised on failure here, but the contract is visible in the
        // error path: no wav file appears next to the input.
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.ogg");
        std::fs::write(&input, b"junk").unwrap();

        let converter = FfmpegTranscoder::new("/nonexistent/ffmpeg");
        let _ = converter.transcode_to_wav(&input).await;
        assert!(!input.with_extension("wav").exists());
    }
}
