//! Temporary media file handle
//!
//! Downloaded audio is staged on local disk while the pipeline runs. The
//! handle owns both the raw download and the transcoded copy and removes
//! them when dropped, so cleanup happens on every exit path.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Handle to the temporary files of one downloaded media object.
///
/// Owned by the single webhook invocation that created it. Dropping the
/// handle deletes the raw file and, if present, the transcoded file.
/// Deletion errors are swallowed.
#[derive(Debug)]
pub struct MediaHandle {
    raw_path: PathBuf,
    decoded_path: Option<PathBuf>,
}

impl MediaHandle {
    /// Create a handle owning the raw downloaded file.
    #[must_use]
    pub const fn new(raw_path: PathBuf) -> Self {
        Self {
            raw_path,
            decoded_path: None,
        }
    }

    /// Path of the raw downloaded bytes.
    #[must_use]
    pub fn raw_path(&self) -> &Path {
        &self.raw_path
    }

    /// Path of the transcoded copy, if transcoding has run.
    #[must_use]
    pub fn decoded_path(&self) -> Option<&Path> {
        self.decoded_path.as_deref()
    }

    /// Register the transcoded file so it is deleted together with the raw one.
    pub fn set_decoded(&mut self, path: PathBuf) {
        self.decoded_path = Some(path);
    }
}

impl Drop for MediaHandle {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.raw_path);
        if let Some(decoded) = &self.decoded_path {
            let _ = std::fs::remove_file(decoded);
        }
        debug!(raw = %self.raw_path.display(), "Cleaned up temporary media files");
    }
}
