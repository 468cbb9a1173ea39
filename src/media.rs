//! Media encoding for vision requests
//!
//! Reads an image file and base64-encodes its raw bytes for attachment to
//! an outgoing chat request. No decoding, resizing, or format validation
//! happens here; the model endpoint is responsible for interpreting the
//! pixels.

use crate::error::{Result, VisionChatError};
use base64::engine::general_purpose;
use base64::Engine;
use std::path::Path;

/// Base64-encoded image payload
///
/// A request-scoped value: it rides along on a single exchange and is
/// never persisted with the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage(String);

impl EncodedImage {
    /// The base64 text of the image bytes
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the payload, yielding the base64 text
    pub fn into_string(self) -> String {
        self.0
    }
}

/// Encode an image file for a vision exchange
///
/// Reads the file in full and base64-encodes the raw bytes with the
/// standard alphabet. Encoding is deterministic for a given file.
///
/// # Errors
///
/// Returns [`VisionChatError::FileNotFound`] when the path does not
/// resolve to a file, and `Io` for other read failures.
///
/// # Examples
///
/// ```no_run
/// use visionchat::media::encode_image;
///
/// # fn example() -> visionchat::error::Result<()> {
/// let image = encode_image("photo.png")?;
/// println!("{} base64 chars", image.as_str().len());
/// # Ok(())
/// # }
/// ```
pub fn encode_image(path: impl AsRef<Path>) -> Result<EncodedImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => {
            VisionChatError::FileNotFound(path.display().to_string())
        }
        _ => VisionChatError::Io(e),
    })?;

    tracing::debug!("Encoding {} bytes from {}", bytes.len(), path.display());
    Ok(EncodedImage(general_purpose::STANDARD.encode(&bytes)))
}
