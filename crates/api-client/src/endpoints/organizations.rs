//! Organizations API endpoints
//!
//! Requires a user (account) secret key rather than an organization key.
//! Logo and certificate uploads are sent as `multipart/form-data`.

use super::common::{Address, SearchResult};
use crate::client::{require_id, FacturapiClient};
use crate::enums::{GlobalInvoicePeriodicity, TaxSystem};
use crate::error::{ApiError, ApiResult};
use crate::request::{MultipartForm, RequestOptions};
use crate::response::ApiResponse;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Organizations API interface
#[derive(Clone)]
pub struct OrganizationsApi {
    client: FacturapiClient,
}

impl OrganizationsApi {
    /// Create a new organizations API interface
    pub(crate) fn new(client: FacturapiClient) -> Self {
        Self { client }
    }

    /// Create a new organization
    ///
    /// POST /organizations
    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> ApiResult<Organization> {
        self.client
            .json(Method::POST, "/organizations", RequestOptions::new().body(data)?)
            .await
    }

    /// List organizations, paginated
    ///
    /// GET /organizations
    pub async fn list<P: Serialize + ?Sized>(&self, params: &P) -> ApiResult<SearchResult<Organization>> {
        self.client
            .json(Method::GET, "/organizations", RequestOptions::new().params(params)?)
            .await
    }

    /// Get a single organization
    ///
    /// GET /organizations/{id}
    pub async fn retrieve(&self, id: &str) -> ApiResult<Organization> {
        let id = require_id(id)?;
        self.client
            .json(Method::GET, &format!("/organizations/{id}"), RequestOptions::new())
            .await
    }

    /// Update the organization's legal information
    ///
    /// PUT /organizations/{id}/legal
    pub async fn update_legal<B: Serialize + ?Sized>(&self, id: &str, data: &B) -> ApiResult<Organization> {
        self.put_section(id, "legal", data).await
    }

    /// Update PDF customization settings
    ///
    /// PUT /organizations/{id}/customization
    pub async fn update_customization<B: Serialize + ?Sized>(
        &self,
        id: &str,
        data: &B,
    ) -> ApiResult<Organization> {
        self.put_section(id, "customization", data).await
    }

    /// Update receipt settings
    ///
    /// PUT /organizations/{id}/receipts
    pub async fn update_receipt_settings<B: Serialize + ?Sized>(
        &self,
        id: &str,
        data: &B,
    ) -> ApiResult<Organization> {
        self.put_section(id, "receipts", data).await
    }

    /// Set the self-invoice portal domain
    ///
    /// PUT /organizations/{id}/domain
    pub async fn update_domain<B: Serialize + ?Sized>(&self, id: &str, data: &B) -> ApiResult<Organization> {
        self.put_section(id, "domain", data).await
    }

    /// Check whether a portal domain is free
    ///
    /// PUT /organizations/domain-check
    pub async fn check_domain_is_available<B: Serialize + ?Sized>(
        &self,
        data: &B,
    ) -> ApiResult<DomainAvailability> {
        self.client
            .json(
                Method::PUT,
                "/organizations/domain-check",
                RequestOptions::new().body(data)?,
            )
            .await
    }

    /// Upload the organization logo
    ///
    /// PUT /organizations/{id}/logo (multipart field `file`)
    pub async fn upload_logo(&self, id: &str, file: impl Into<Bytes>) -> ApiResult<Organization> {
        let id = require_id(id)?;
        let form = MultipartForm::new().file("file", "file", file);
        self.client
            .json(
                Method::PUT,
                &format!("/organizations/{id}/logo"),
                RequestOptions::new().form(form),
            )
            .await
    }

    /// Upload the CSD certificate and private key
    ///
    /// PUT /organizations/{id}/certificate (multipart fields `cer`, `key`, `password`)
    pub async fn upload_certificate(
        &self,
        id: &str,
        cer_file: impl Into<Bytes>,
        key_file: impl Into<Bytes>,
        password: &str,
    ) -> ApiResult<Organization> {
        let id = require_id(id)?;
        if password.is_empty() {
            return Err(ApiError::validation("password is required"));
        }
        let form = MultipartForm::new()
            .file("cer", "cer.cer", cer_file)
            .file("key", "key.key", key_file)
            .text("password", password);
        self.client
            .json(
                Method::PUT,
                &format!("/organizations/{id}/certificate"),
                RequestOptions::new().form(form),
            )
            .await
    }

    /// Remove the uploaded certificate
    ///
    /// DELETE /organizations/{id}/certificate
    pub async fn delete_certificate(&self, id: &str) -> ApiResult<Organization> {
        let id = require_id(id)?;
        self.client
            .json(
                Method::DELETE,
                &format!("/organizations/{id}/certificate"),
                RequestOptions::new(),
            )
            .await
    }

    /// Permanently remove an organization
    ///
    /// DELETE /organizations/{id}
    pub async fn delete(&self, id: &str) -> ApiResult<Organization> {
        let id = require_id(id)?;
        self.client
            .json(Method::DELETE, &format!("/organizations/{id}"), RequestOptions::new())
            .await
    }

    /// Get the test API key
    ///
    /// GET /organizations/{id}/apikeys/test
    pub async fn get_test_api_key(&self, id: &str) -> ApiResult<String> {
        let id = require_id(id)?;
        let response = self
            .client
            .get(&format!("/organizations/{id}/apikeys/test"), RequestOptions::new())
            .await?;
        api_key_from(response)
    }

    /// Renew the test API key; the previous one stops working
    ///
    /// PUT /organizations/{id}/apikeys/test
    pub async fn renew_test_api_key(&self, id: &str) -> ApiResult<String> {
        self.renew_key(id, "test").await
    }

    /// Renew the live API key; the previous one stops working
    ///
    /// PUT /organizations/{id}/apikeys/live
    pub async fn renew_live_api_key(&self, id: &str) -> ApiResult<String> {
        self.renew_key(id, "live").await
    }

    async fn renew_key(&self, id: &str, mode: &str) -> ApiResult<String> {
        let id = require_id(id)?;
        let response = self
            .client
            .put(&format!("/organizations/{id}/apikeys/{mode}"), RequestOptions::new())
            .await?;
        api_key_from(response)
    }

    async fn put_section<B: Serialize + ?Sized>(
        &self,
        id: &str,
        section: &str,
        data: &B,
    ) -> ApiResult<Organization> {
        let id = require_id(id)?;
        self.client
            .json(
                Method::PUT,
                &format!("/organizations/{id}/{section}"),
                RequestOptions::new().body(data)?,
            )
            .await
    }
}

/// API keys come back either as a JSON string or as plain text
fn api_key_from(response: ApiResponse) -> ApiResult<String> {
    match response {
        ApiResponse::Json(Value::String(key)) => Ok(key),
        other => other.into_text(),
    }
}

/// Organization entity
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub plan: Option<String>,
    #[serde(default)]
    pub is_production_ready: bool,
    #[serde(default)]
    pub pending_steps: Vec<PendingStep>,
    pub logo_url: Option<String>,
    pub domain: Option<String>,
    pub timezone: Option<String>,
    pub legal: Option<LegalInfo>,
    pub customization: Option<Value>,
    pub certificate: Option<CertificateInfo>,
    pub receipts: Option<ReceiptSettings>,
}

/// Setup step still required before going live
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingStep {
    #[serde(rename = "type")]
    pub step_type: String,
    pub description: String,
}

/// Legal data of the issuer
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalInfo {
    pub name: Option<String>,
    pub legal_name: String,
    pub tax_id: String,
    pub tax_system: Option<TaxSystem>,
    pub address: Option<Address>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub support_email: Option<String>,
}

/// CSD certificate status
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateInfo {
    pub has_certificate: bool,
    pub updated_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
    pub serial_number: Option<String>,
}

/// Receipt settings
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptSettings {
    pub periodicity: Option<GlobalInvoicePeriodicity>,
    pub duration_days: Option<u32>,
    pub next_folio_number: Option<u64>,
    pub next_folio_number_test: Option<u64>,
}

/// Result of [`OrganizationsApi::check_domain_is_available`]
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainAvailability {
    pub available: bool,
}
