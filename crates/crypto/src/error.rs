//! Error types for the crypto crate.

use thiserror::Error;

/// Result type alias for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Errors that can occur while checking a webhook signature.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature is not valid hex
    #[error("Invalid signature format: {0}")]
    InvalidSignature(String),

    /// Decoded signature length differs from the digest length
    #[error("Signature length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch {
        /// Digest length in bytes
        expected: usize,
        /// Decoded signature length in bytes
        actual: usize,
    },

    /// Digest and signature differ
    #[error("Signature mismatch")]
    SignatureMismatch,
}
