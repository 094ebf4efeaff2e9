//! HMAC-SHA256 signing and verification.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{constant_time_compare, CryptoError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of an HMAC-SHA256 digest.
pub const DIGEST_LEN: usize = 32;

/// Compute the raw HMAC-SHA256 digest of `message` keyed by `key`.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> [u8; DIGEST_LEN] {
    let mut mac = HmacSha256::new_from_slice(key)
        .expect("HMAC can take key of any size");
    mac.update(message);
    let mut digest = [0u8; DIGEST_LEN];
    digest.copy_from_slice(&mac.finalize().into_bytes());
    digest
}

/// Compute the HMAC-SHA256 digest as a lowercase hex string.
///
/// This is the format Facturapi sends in the `Facturapi-Signature` header.
pub fn hmac_sha256_hex(key: &[u8], message: &[u8]) -> String {
    hex::encode(hmac_sha256(key, message))
}

/// Decode a hex-encoded signature into bytes.
///
/// Upper and lower case digits are both accepted. Odd-length input and
/// non-hex characters are rejected.
pub fn decode_signature(signature: &str) -> Result<Vec<u8>> {
    hex::decode(signature.trim()).map_err(|e| CryptoError::InvalidSignature(e.to_string()))
}

/// Verify a hex signature against the HMAC-SHA256 of `message`.
///
/// The decoded signature length is checked against [`DIGEST_LEN`] before any
/// content comparison; contents are compared in constant time.
pub fn verify_hmac_sha256(key: &[u8], message: &[u8], signature: &str) -> Result<()> {
    let provided = decode_signature(signature)?;
    if provided.len() != DIGEST_LEN {
        return Err(CryptoError::LengthMismatch {
            expected: DIGEST_LEN,
            actual: provided.len(),
        });
    }

    let expected = hmac_sha256(key, message);
    if constant_time_compare(&expected, &provided) {
        Ok(())
    } else {
        Err(CryptoError::SignatureMismatch)
    }
}
