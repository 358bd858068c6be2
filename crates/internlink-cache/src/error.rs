//! Cache error types.

use std::path::PathBuf;
use thiserror::Error;

/// Cache operation error.
#[derive(Debug, Error)]
pub enum CacheError {
    /// File I/O error.
    #[error("Failed to {operation} cache file: {path}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Not a cache file, or a damaged header.
    #[error("Invalid cache file format: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    /// Written by a newer app version.
    #[error("Cache file version {found} is not supported (maximum: {max_supported})")]
    UnsupportedVersion {
        found: u32,
        max_supported: u32,
        path: PathBuf,
    },

    /// Payload does not match its recorded digest.
    #[error("Cache file is corrupted: {path}")]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    /// Serialization error.
    #[error("Failed to serialize cache data")]
    Serialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Deserialization error.
    #[error("Failed to deserialize cache data")]
    Deserialization {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Atomic write failed (temp file couldn't be renamed).
    #[error("Failed to complete cache write")]
    AtomicWriteFailed {
        temp_path: PathBuf,
        target_path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CacheError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Io { .. } | Self::AtomicWriteFailed { .. } => {
                "Could not save hospital data on this device. \
                 Check storage space and permissions."
                    .to_string()
            }
            Self::InvalidFormat { .. }
            | Self::ChecksumMismatch { .. }
            | Self::Deserialization { .. } => {
                "Saved hospital data on this device is damaged and will be refreshed."
                    .to_string()
            }
            Self::UnsupportedVersion { .. } => {
                "Saved hospital data was written by a newer app version.".to_string()
            }
            Self::Serialization { .. } => {
                "An error occurred while saving hospital data.".to_string()
            }
        }
    }
}

/// Result type alias for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
