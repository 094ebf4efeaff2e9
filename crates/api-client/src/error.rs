//! Error types for the API client

use facturapi_crypto::CryptoError;
use std::fmt;
use thiserror::Error;

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// API client errors
///
/// Every variant renders a human-readable message through `Display`; use
/// [`ApiError::kind`] to branch on the category instead of matching text.
#[derive(Error, Debug)]
pub enum ApiError {
    /// A required argument was missing; no request was sent
    #[error("{0}")]
    Validation(String),

    /// Network-level failure (connection, DNS, TLS, timeout)
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Transport failure reported by a non-reqwest adapter
    #[error("HTTP request failed: {0}")]
    TransportMessage(String),

    /// The API answered with a non-2xx status
    #[error("{message}")]
    ApiResponse {
        /// HTTP status code
        status: u16,
        /// Message from the JSON error body, or the status text
        message: String,
    },

    /// Webhook signature did not authenticate the payload
    #[error("invalid signature")]
    Signature(#[source] Option<CryptoError>),

    /// Webhook payload was neither text, bytes nor a JSON object
    #[error("invalid payload type: {0}")]
    PayloadShape(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Local I/O failed while writing a download
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
}

/// Discriminant of [`ApiError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing identifier or argument, detected before any network call
    Validation,
    /// Network failure
    Transport,
    /// Non-2xx API response
    Api,
    /// Webhook authentication failure
    Signature,
    /// Unsupported webhook payload
    PayloadShape,
    /// Body could not be decoded
    Decode,
    /// Client configuration problem
    Config,
}

impl ApiError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// The guard error returned when an id argument is empty
    pub fn id_required() -> Self {
        Self::validation("id is required")
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a missing env var error
    pub fn missing_env(var: impl Into<String>) -> Self {
        Self::MissingEnvVar(var.into())
    }

    /// Create an API response error
    pub fn api_response(status: u16, message: impl Into<String>) -> Self {
        Self::ApiResponse {
            status,
            message: message.into(),
        }
    }

    /// Create a transport error from any adapter-specific message
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportMessage(msg.into())
    }

    /// Create a signature error
    pub fn signature(cause: impl Into<Option<CryptoError>>) -> Self {
        Self::Signature(cause.into())
    }

    /// Category of this error
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport(_) | Self::TransportMessage(_) | Self::Io(_) => ErrorKind::Transport,
            Self::ApiResponse { .. } => ErrorKind::Api,
            Self::Signature(_) => ErrorKind::Signature,
            Self::PayloadShape(_) => ErrorKind::PayloadShape,
            Self::Json(_) => ErrorKind::Decode,
            Self::Config(_) | Self::MissingEnvVar(_) => ErrorKind::Config,
        }
    }

    /// HTTP status for API errors
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiResponse { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if this is a client error (4xx)
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if (400..500).contains(status))
    }

    /// Check if this is a server error (5xx)
    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiResponse { status, .. } if *status >= 500)
    }
}

impl From<CryptoError> for ApiError {
    fn from(err: CryptoError) -> Self {
        Self::Signature(Some(err))
    }
}

/// Error context for better debugging
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Request ID for correlation
    pub request_id: Option<String>,
    /// Path that was called
    pub path: String,
    /// HTTP method used
    pub method: String,
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)?;
        if let Some(ref id) = self.request_id {
            write!(f, " (request_id: {id})")?;
        }
        Ok(())
    }
}
