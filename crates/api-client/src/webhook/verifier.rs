//! Signature backends and the verifier built on them.

use super::WebhookPayload;
use crate::client::FacturapiClient;
use crate::endpoints::ApiEvent;
use crate::error::{ApiError, ApiResult, ErrorKind};
use crate::request::RequestOptions;
use async_trait::async_trait;
use facturapi_crypto::verify_hmac_sha256;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// HMAC capability used by [`WebhookVerifier`]
#[async_trait]
pub trait SignatureBackend: Send + Sync {
    /// Succeed only if `signature` is the HMAC-SHA256 of `payload` under `secret`
    async fn verify(&self, secret: &str, payload: &str, signature: &str) -> ApiResult<()>;
}

/// In-process HMAC-SHA256 with constant-time comparison
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalHmac;

impl LocalHmac {
    /// Synchronous check
    pub fn check(&self, secret: &str, payload: &str, signature: &str) -> ApiResult<()> {
        verify_hmac_sha256(secret.as_bytes(), payload.as_bytes(), signature).map_err(ApiError::from)
    }
}

#[async_trait]
impl SignatureBackend for LocalHmac {
    async fn verify(&self, secret: &str, payload: &str, signature: &str) -> ApiResult<()> {
        self.check(secret, payload, signature)
    }
}

#[derive(Serialize)]
struct ValidateSignatureBody<'a> {
    secret: &'a str,
    signature: &'a str,
    payload: &'a str,
}

#[derive(Deserialize)]
struct ValidateSignatureResponse {
    valid: bool,
}

/// Delegates the check to `POST /webhooks/validate-signature`
///
/// For runtimes without a usable local HMAC primitive. Any API error
/// response counts as a failed verification; transport failures propagate
/// unchanged.
#[derive(Clone)]
pub struct RemoteValidation {
    client: FacturapiClient,
}

impl RemoteValidation {
    /// Use `client` to reach the validation endpoint
    #[must_use]
    pub fn new(client: FacturapiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SignatureBackend for RemoteValidation {
    async fn verify(&self, secret: &str, payload: &str, signature: &str) -> ApiResult<()> {
        let options = RequestOptions::new().body(&ValidateSignatureBody {
            secret,
            signature,
            payload,
        })?;

        let outcome = self
            .client
            .json::<ValidateSignatureResponse>(Method::POST, "/webhooks/validate-signature", options)
            .await;

        match outcome {
            Ok(ValidateSignatureResponse { valid: true }) => Ok(()),
            Ok(ValidateSignatureResponse { valid: false }) => Err(ApiError::signature(None)),
            Err(e) if e.kind() == ErrorKind::Api => {
                debug!(error = %e, "Remote signature validation rejected");
                Err(ApiError::signature(None))
            }
            Err(e) => Err(e),
        }
    }
}

/// Authenticates webhook deliveries and parses the event
#[derive(Debug, Clone, Default)]
pub struct WebhookVerifier<B = LocalHmac> {
    backend: B,
}

impl WebhookVerifier<LocalHmac> {
    /// Verifier using the in-process HMAC
    #[must_use]
    pub fn local() -> Self {
        Self { backend: LocalHmac }
    }
}

impl<B: SignatureBackend> WebhookVerifier<B> {
    /// Verifier over a specific backend
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Verify a delivery and return the event
    ///
    /// The payload is canonicalized, its HMAC checked against `signature`,
    /// and only after a match parsed into an [`ApiEvent`]. No part of the
    /// payload is returned on failure.
    ///
    /// [`ApiEvent`] requires a `type` field, so a correctly signed payload
    /// without one fails with a decode error. Use
    /// [`WebhookVerifier::verify_into`] with `serde_json::Value` to accept
    /// arbitrary objects.
    pub async fn verify(
        &self,
        secret: &str,
        signature: &str,
        payload: impl Into<WebhookPayload>,
    ) -> ApiResult<ApiEvent> {
        self.verify_into(secret, signature, payload).await
    }

    /// Like [`WebhookVerifier::verify`], deserializing into a caller type
    pub async fn verify_into<T: DeserializeOwned>(
        &self,
        secret: &str,
        signature: &str,
        payload: impl Into<WebhookPayload>,
    ) -> ApiResult<T> {
        let canonical = payload.into().canonicalize()?;

        if let Err(e) = self.backend.verify(secret, &canonical, signature).await {
            warn!(error = %e, payload_len = canonical.len(), "Webhook signature rejected");
            return Err(e);
        }

        Ok(serde_json::from_str(&canonical)?)
    }
}
