//! Store error types.

use thiserror::Error;

/// Remote store operation error.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection, TLS, or timeout failure before a response arrived.
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not the expected JSON.
    #[error("failed to decode server response")]
    Decode {
        #[source]
        source: reqwest::Error,
    },
}

impl StoreError {
    /// Get a user-friendly message for this error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Network(source) if source.is_timeout() => {
                "The hospital service took too long to respond. Try again.".to_string()
            }
            Self::Network(_) => {
                "Could not reach the hospital service. Check your connection.".to_string()
            }
            Self::Status { status: 401 | 403, .. } => {
                "You are not authorised to perform this action.".to_string()
            }
            Self::Status { status: 404, .. } => {
                "That hospital listing no longer exists.".to_string()
            }
            Self::Status { status, .. } => {
                format!("The hospital service reported a problem (status {status}).")
            }
            Self::Decode { .. } => {
                "The hospital service returned data this app could not read.".to_string()
            }
        }
    }
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
