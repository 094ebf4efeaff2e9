//! Retentions API endpoints

use super::common::{GenericResponse, SearchResult, SendEmailBody};
use crate::client::{require_id, FacturapiClient};
use crate::enums::InvoiceStatus;
use crate::error::ApiResult;
use crate::request::RequestOptions;
use crate::response::BinaryBody;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Retentions API interface
#[derive(Clone)]
pub struct RetentionsApi {
    client: FacturapiClient,
}

impl RetentionsApi {
    /// Create a new retentions API interface
    pub(crate) fn new(client: FacturapiClient) -> Self {
        Self { client }
    }

    /// Create a retention CFDI
    ///
    /// POST /retentions
    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> ApiResult<Retention> {
        self.client
            .json(Method::POST, "/retentions", RequestOptions::new().body(data)?)
            .await
    }

    /// List retentions, paginated
    ///
    /// GET /retentions
    pub async fn list<P: Serialize + ?Sized>(&self, params: &P) -> ApiResult<SearchResult<Retention>> {
        self.client
            .json(Method::GET, "/retentions", RequestOptions::new().params(params)?)
            .await
    }

    /// Get a single retention
    ///
    /// GET /retentions/{id}
    pub async fn retrieve(&self, id: &str) -> ApiResult<Retention> {
        let id = require_id(id)?;
        self.client
            .json(Method::GET, &format!("/retentions/{id}"), RequestOptions::new())
            .await
    }

    /// Cancel a retention
    ///
    /// DELETE /retentions/{id}
    pub async fn cancel<P: Serialize + ?Sized>(&self, id: &str, params: &P) -> ApiResult<Retention> {
        let id = require_id(id)?;
        self.client
            .json(
                Method::DELETE,
                &format!("/retentions/{id}"),
                RequestOptions::new().params(params)?,
            )
            .await
    }

    /// Email the retention
    ///
    /// POST /retentions/{id}/email
    pub async fn send_by_email(&self, id: &str, options: &SendEmailBody) -> ApiResult<GenericResponse> {
        let id = require_id(id)?;
        self.client
            .json(
                Method::POST,
                &format!("/retentions/{id}/email"),
                RequestOptions::new().body(options)?,
            )
            .await
    }

    /// Download the retention PDF
    pub async fn download_pdf(&self, id: &str) -> ApiResult<BinaryBody> {
        self.download(id, "pdf").await
    }

    /// Download the retention XML
    pub async fn download_xml(&self, id: &str) -> ApiResult<BinaryBody> {
        self.download(id, "xml").await
    }

    /// Download a ZIP with PDF and XML
    pub async fn download_zip(&self, id: &str) -> ApiResult<BinaryBody> {
        self.download(id, "zip").await
    }

    async fn download(&self, id: &str, file: &str) -> ApiResult<BinaryBody> {
        let id = require_id(id)?;
        self.client.download(&format!("/retentions/{id}/{file}")).await
    }
}

/// Retention entity
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retention {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub livemode: bool,
    pub organization: Option<String>,
    pub status: Option<InvoiceStatus>,
    pub uuid: Option<String>,
    pub customer: Option<Value>,
    pub cve_retenc: Option<String>,
    pub external_id: Option<String>,
    pub verification_url: Option<String>,
    pub totals: Option<Value>,
}
