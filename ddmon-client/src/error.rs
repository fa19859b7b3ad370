//! Error types for the client.

use thiserror::Error;

/// Errors that can occur when calling the Monitor API.
///
/// No operation retries or recovers locally: a mutating call that returns an
/// error should be treated as not having taken effect.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request body could not be serialized.
    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The operation needs a monitor id and none was set.
    #[error("Monitor has no id")]
    MissingId,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Connection failed.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Timeout waiting for response.
    #[error("Request timed out")]
    Timeout,

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The API answered with a non-success status.
    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("Failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The transport could not be set up.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// The HTTP status, when the API rejected the request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API reported the monitor as missing.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Connection(err.to_string())
        } else {
            ClientError::Http(err.to_string())
        }
    }
}

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
