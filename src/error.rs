//! Error types for VisionChat
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for VisionChat operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, transcript storage, media encoding, and
/// exchanges with the model endpoint.
#[derive(Error, Debug)]
pub enum VisionChatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Persisted transcript exists but cannot be interpreted as a turn sequence
    #[error("Transcript file is corrupt: {0}")]
    StorageCorrupt(String),

    /// Transcript could not be written to disk
    #[error("Transcript file is unwritable: {0}")]
    StorageUnwritable(String),

    /// Referenced media file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// The model endpoint could not be reached at all
    #[error("Endpoint unreachable: {0}")]
    EndpointUnreachable(String),

    /// The model endpoint answered with a non-success status
    #[error("Endpoint returned error {status}: {message}")]
    EndpointError {
        /// HTTP status code reported by the endpoint
        status: u16,
        /// Response body text, if any
        message: String,
    },

    /// The endpoint answered 2xx but the body did not have the expected shape
    #[error("Malformed reply from endpoint: {0}")]
    MalformedReply(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for VisionChat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = VisionChatError::Config("invalid format".to_string());
        assert_eq!(error.to_string(), "Configuration error: invalid format");
    }

    #[test]
    fn test_storage_corrupt_error_display() {
        let error = VisionChatError::StorageCorrupt("unexpected token".to_string());
        assert_eq!(
            error.to_string(),
            "Transcript file is corrupt: unexpected token"
        );
    }

    #[test]
    fn test_storage_unwritable_error_display() {
        let error = VisionChatError::StorageUnwritable("permission denied".to_string());
        assert_eq!(
            error.to_string(),
            "Transcript file is unwritable: permission denied"
        );
    }

    #[test]
    fn test_file_not_found_error_display() {
        let error = VisionChatError::FileNotFound("cat.png".to_string());
        assert_eq!(error.to_string(), "File not found: cat.png");
    }

    #[test]
    fn test_endpoint_unreachable_error_display() {
        let error = VisionChatError::EndpointUnreachable("connection refused".to_string());
        assert_eq!(
            error.to_string(),
            "Endpoint unreachable: connection refused"
        );
    }

    #[test]
    fn test_endpoint_error_display() {
        let error = VisionChatError::EndpointError {
            status: 500,
            message: "model not loaded".to_string(),
        };
        let s = error.to_string();
        assert!(s.contains("500"));
        assert!(s.contains("model not loaded"));
    }

    #[test]
    fn test_malformed_reply_error_display() {
        let error = VisionChatError::MalformedReply("missing message field".to_string());
        assert_eq!(
            error.to_string(),
            "Malformed reply from endpoint: missing message field"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: VisionChatError = io_error.into();
        assert!(matches!(error, VisionChatError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_str = "{invalid json}";
        let json_error = serde_json::from_str::<serde_json::Value>(json_str).unwrap_err();
        let error: VisionChatError = json_error.into();
        assert!(matches!(error, VisionChatError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: VisionChatError = yaml_error.into();
        assert!(matches!(error, VisionChatError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<VisionChatError>();
    }
}
