//! Error types for MetaKube API operations

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while talking to the MetaKube API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The request never produced a response
    #[error("request failed: {0}")]
    Http(String),

    /// The API answered with a non-success status
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The caller-supplied deadline elapsed before the response arrived
    #[error("deadline exceeded while waiting for {0}")]
    DeadlineExceeded(String),

    /// Client configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}

/// Result type for MetaKube API operations
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Vec<String>,
}

impl ClientError {
    /// Build an API error from a non-success response.
    ///
    /// The MetaKube API wraps failures as `{"error": {"code", "message", "details"}}`.
    /// When the body has that shape the message (and details) are used, otherwise
    /// the raw body is kept so nothing the server said gets lost.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) if !envelope.error.message.is_empty() => {
                if envelope.error.details.is_empty() {
                    envelope.error.message
                } else {
                    format!(
                        "{} ({})",
                        envelope.error.message,
                        envelope.error.details.join(", ")
                    )
                }
            }
            _ => body.trim().to_string(),
        };

        ClientError::Api { status, message }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Http(err.to_string())
        }
    }
}
