//! Transcript persistence
//!
//! Loads and saves the full transcript as a pretty-printed JSON array at a
//! configured path. Saves go through a sibling temp file and a rename so a
//! crash mid-write never leaves a truncated transcript behind.

use crate::error::{Result, VisionChatError};
use crate::transcript::Transcript;
use std::path::{Path, PathBuf};

/// File-backed transcript store
///
/// # Examples
///
/// ```no_run
/// use visionchat::store::TranscriptStore;
/// use visionchat::transcript::Transcript;
///
/// # fn example() -> visionchat::error::Result<()> {
/// let store = TranscriptStore::new("history.json");
/// let mut transcript = store.load()?;
/// transcript.append_user("Hello");
/// store.save(&transcript)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    path: PathBuf,
}

impl TranscriptStore {
    /// Create a store backed by the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path this store reads and writes
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted transcript
    ///
    /// A missing file is a fresh start and yields an empty transcript.
    /// A file that exists but does not parse as a turn array is reported
    /// as [`VisionChatError::StorageCorrupt`]; nothing is repaired or
    /// discarded automatically.
    ///
    /// # Errors
    ///
    /// Returns `StorageCorrupt` on malformed content and `Io` on read
    /// failures other than the file being absent.
    pub fn load(&self) -> Result<Transcript> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No transcript at {}, starting empty", self.path.display());
                return Ok(Transcript::new());
            }
            Err(e) => return Err(VisionChatError::Io(e).into()),
        };

        let transcript: Transcript = serde_json::from_str(&contents).map_err(|e| {
            VisionChatError::StorageCorrupt(format!("{}: {}", self.path.display(), e))
        })?;

        tracing::debug!(
            "Loaded {} turns from {}",
            transcript.len(),
            self.path.display()
        );
        Ok(transcript)
    }

    /// Persist the full transcript
    ///
    /// Serializes the entire turn sequence, writes it to a sibling temp
    /// file, and renames it over the target path.
    ///
    /// # Errors
    ///
    /// Returns [`VisionChatError::StorageUnwritable`] when the temp file
    /// cannot be written or the rename fails.
    pub fn save(&self, transcript: &Transcript) -> Result<()> {
        let contents = serde_json::to_string_pretty(transcript)
            .map_err(VisionChatError::Serialization)?;

        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, contents).map_err(|e| {
            VisionChatError::StorageUnwritable(format!("{}: {}", tmp_path.display(), e))
        })?;

        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            VisionChatError::StorageUnwritable(format!("{}: {}", self.path.display(), e))
        })?;

        tracing::debug!(
            "Saved {} turns to {}",
            transcript.len(),
            self.path.display()
        );
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}
