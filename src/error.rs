//! Error Handling Module
//!
//! A single error type, `LlmError`, is shared by the request builders, the
//! transport and the service layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use openai_service::error::LlmError;
//!
//! let error = LlmError::api_error(404, "Not found");
//! assert_eq!(error.status_code(), Some(404));
//! assert!(error.is_client_error());
//! ```

use thiserror::Error;

/// Errors produced while building, sending or decoding API requests.
#[derive(Debug, Clone, Error)]
pub enum LlmError {
    /// Base, path and query items do not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Request parameters could not be serialized to JSON.
    #[error("Encoding error: {0}")]
    EncodingError(String),

    /// A header name or value cannot be represented on the wire.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// No API key was supplied and none was found in the environment.
    #[error("Missing API key: {0}")]
    MissingApiKey(String),

    /// The transport failed before a response was received.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// The server answered with a non-success status.
    #[error("API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        details: Option<serde_json::Value>,
    },

    /// The response body did not decode into the expected shape.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The event stream broke mid-flight.
    #[error("Stream error: {0}")]
    StreamError(String),
}

impl LlmError {
    /// Shorthand for an `ApiError` without details.
    pub fn api_error(code: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Whether the server rejected the request as a client error (4xx).
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(code) if (400..500).contains(&code))
    }
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
