//! Cryptographic primitives for Facturapi webhooks.
//!
//! This crate provides:
//! - HMAC-SHA256 digests over webhook payloads
//! - Hex signature decoding
//! - Constant-time comparison of digests
//! - Optional `wasm-bindgen` exports for browser runtimes (`wasm` feature)

#![warn(missing_docs)]

mod error;
mod hmac_impl;
mod timing;

#[cfg(feature = "wasm")]
mod wasm;

pub use error::{CryptoError, Result};
pub use hmac_impl::{decode_signature, hmac_sha256, hmac_sha256_hex, verify_hmac_sha256, DIGEST_LEN};
pub use timing::constant_time_compare;
