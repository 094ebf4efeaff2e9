//! Webhook signature verification
//!
//! Facturapi signs every webhook delivery with HMAC-SHA256 over the raw
//! request body, keyed by the endpoint secret, and sends the hex digest in
//! the [`SIGNATURE_HEADER`] header. [`WebhookVerifier`] authenticates the
//! body and only then parses it into an [`ApiEvent`](crate::endpoints::ApiEvent).

mod payload;
mod verifier;

pub use payload::WebhookPayload;
pub use verifier::{LocalHmac, RemoteValidation, SignatureBackend, WebhookVerifier};

/// Header carrying the hex signature of a webhook delivery
pub const SIGNATURE_HEADER: &str = "Facturapi-Signature";
