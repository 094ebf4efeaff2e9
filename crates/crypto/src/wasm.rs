//! WASM bindings for browser runtimes.
//!
//! Verification goes through the same decode, length check and
//! constant-time byte comparison as the native path.

use wasm_bindgen::prelude::*;

/// Generate an HMAC-SHA256 signature and return it as a hex string.
#[wasm_bindgen]
pub fn hmac_sha256_hex(key: &str, message: &str) -> String {
    crate::hmac_sha256_hex(key.as_bytes(), message.as_bytes())
}

/// Verify a Facturapi webhook signature.
///
/// # Arguments
/// * `secret` - The webhook endpoint secret
/// * `payload` - The raw request body
/// * `signature_hex` - Value of the `Facturapi-Signature` header
///
/// # Returns
/// true if the signature matches, false otherwise
#[wasm_bindgen]
pub fn verify_webhook_signature(secret: &str, payload: &str, signature_hex: &str) -> bool {
    crate::verify_hmac_sha256(secret.as_bytes(), payload.as_bytes(), signature_hex).is_ok()
}

/// Constant-time comparison of two strings.
#[wasm_bindgen]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    crate::constant_time_compare(a.as_bytes(), b.as_bytes())
}
