//! Invoices API endpoints
//!
//! Maps to `/invoices`:
//! - Create, list, retrieve and cancel invoices (CFDI)
//! - Download PDF, XML and ZIP files and cancellation receipts
//! - Draft lifecycle: edit, stamp, copy to a new draft
//! - Email delivery and SAT status refresh

use super::common::{Address, GenericResponse, SearchResult, SendEmailBody};
use crate::client::{require_id, FacturapiClient};
use crate::enums::{
    CancellationMotive, CancellationStatus, InvoiceStatus, InvoiceType, InvoiceUse, PaymentForm,
    PaymentMethod,
};
use crate::error::ApiResult;
use crate::request::RequestOptions;
use crate::response::BinaryBody;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Invoices API interface
#[derive(Clone)]
pub struct InvoicesApi {
    client: FacturapiClient,
}

impl InvoicesApi {
    /// Create a new invoices API interface
    pub(crate) fn new(client: FacturapiClient) -> Self {
        Self { client }
    }

    /// Create a new invoice
    ///
    /// POST /invoices
    ///
    /// `params` carries query options such as `async`; pass `&()` for none.
    pub async fn create<B, P>(&self, body: &B, params: &P) -> ApiResult<Invoice>
    where
        B: Serialize + ?Sized,
        P: Serialize + ?Sized,
    {
        let options = RequestOptions::new().body(body)?.params(params)?;
        self.client.json(Method::POST, "/invoices", options).await
    }

    /// List invoices, paginated
    ///
    /// GET /invoices
    pub async fn list<P: Serialize + ?Sized>(&self, params: &P) -> ApiResult<SearchResult<Invoice>> {
        self.client
            .json(Method::GET, "/invoices", RequestOptions::new().params(params)?)
            .await
    }

    /// Get a single invoice
    ///
    /// GET /invoices/{id}
    pub async fn retrieve(&self, id: &str) -> ApiResult<Invoice> {
        let id = require_id(id)?;
        self.client
            .json(Method::GET, &format!("/invoices/{id}"), RequestOptions::new())
            .await
    }

    /// Cancel an invoice
    ///
    /// DELETE /invoices/{id}?motive=..&substitution=..
    pub async fn cancel(&self, id: &str, options: &CancelInvoiceOptions) -> ApiResult<Invoice> {
        let id = require_id(id)?;
        self.client
            .json(
                Method::DELETE,
                &format!("/invoices/{id}"),
                RequestOptions::new().params(options)?,
            )
            .await
    }

    /// Email the invoice to the customer or to the given addresses
    ///
    /// POST /invoices/{id}/email
    pub async fn send_by_email(&self, id: &str, options: &SendEmailBody) -> ApiResult<GenericResponse> {
        let id = require_id(id)?;
        self.client
            .json(
                Method::POST,
                &format!("/invoices/{id}/email"),
                RequestOptions::new().body(options)?,
            )
            .await
    }

    /// Download the invoice PDF
    ///
    /// GET /invoices/{id}/pdf
    pub async fn download_pdf(&self, id: &str) -> ApiResult<BinaryBody> {
        self.download(id, "pdf").await
    }

    /// Download the invoice XML
    ///
    /// GET /invoices/{id}/xml
    pub async fn download_xml(&self, id: &str) -> ApiResult<BinaryBody> {
        self.download(id, "xml").await
    }

    /// Download a ZIP with both PDF and XML
    ///
    /// GET /invoices/{id}/zip
    pub async fn download_zip(&self, id: &str) -> ApiResult<BinaryBody> {
        self.download(id, "zip").await
    }

    /// Download the cancellation receipt of a canceled invoice as XML
    ///
    /// GET /invoices/{id}/cancellation_receipt/xml
    pub async fn download_cancellation_receipt_xml(&self, id: &str) -> ApiResult<BinaryBody> {
        self.download(id, "cancellation_receipt/xml").await
    }

    /// Download the cancellation receipt of a canceled invoice as PDF
    ///
    /// GET /invoices/{id}/cancellation_receipt/pdf
    pub async fn download_cancellation_receipt_pdf(&self, id: &str) -> ApiResult<BinaryBody> {
        self.download(id, "cancellation_receipt/pdf").await
    }

    /// Edit an invoice in `draft` status
    ///
    /// PUT /invoices/{id}
    pub async fn update_draft<B: Serialize + ?Sized>(&self, id: &str, data: &B) -> ApiResult<Invoice> {
        let id = require_id(id)?;
        self.client
            .json(Method::PUT, &format!("/invoices/{id}"), RequestOptions::new().body(data)?)
            .await
    }

    /// Stamp an invoice in `draft` status
    ///
    /// POST /invoices/{id}/stamp
    pub async fn stamp_draft<P: Serialize + ?Sized>(&self, id: &str, params: &P) -> ApiResult<Invoice> {
        let id = require_id(id)?;
        self.client
            .json(
                Method::POST,
                &format!("/invoices/{id}/stamp"),
                RequestOptions::new().params(params)?,
            )
            .await
    }

    /// Refresh the invoice status from the SAT
    ///
    /// PUT /invoices/{id}/status
    pub async fn update_status(&self, id: &str) -> ApiResult<Invoice> {
        let id = require_id(id)?;
        self.client
            .json(Method::PUT, &format!("/invoices/{id}/status"), RequestOptions::new())
            .await
    }

    /// Create a new draft from an existing invoice
    ///
    /// POST /invoices/{id}/copy
    pub async fn copy_to_draft(&self, id: &str) -> ApiResult<Invoice> {
        let id = require_id(id)?;
        self.client
            .json(Method::POST, &format!("/invoices/{id}/copy"), RequestOptions::new())
            .await
    }

    async fn download(&self, id: &str, file: &str) -> ApiResult<BinaryBody> {
        let id = require_id(id)?;
        self.client.download(&format!("/invoices/{id}/{file}")).await
    }
}

/// Query options for [`InvoicesApi::cancel`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelInvoiceOptions {
    /// SAT cancellation motive
    pub motive: CancellationMotive,
    /// UUID of the replacing invoice, required with motive `01`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitution: Option<String>,
}

impl CancelInvoiceOptions {
    /// Cancel with a motive and no substitution
    #[must_use]
    pub fn new(motive: CancellationMotive) -> Self {
        Self {
            motive,
            substitution: None,
        }
    }

    /// Set the replacing invoice
    #[must_use]
    pub fn with_substitution(mut self, uuid: impl Into<String>) -> Self {
        self.substitution = Some(uuid.into());
        self
    }
}

/// Invoice entity (CFDI)
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub organization: Option<String>,
    #[serde(default)]
    pub livemode: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub date: Option<DateTime<Utc>>,
    #[serde(rename = "type")]
    pub invoice_type: Option<InvoiceType>,
    pub status: InvoiceStatus,
    pub cfdi_version: Option<f64>,
    pub payment_form: Option<PaymentForm>,
    pub payment_method: Option<PaymentMethod>,
    pub currency: Option<String>,
    pub exchange: Option<f64>,
    pub uuid: Option<String>,
    pub customer: Option<Value>,
    pub total: f64,
    #[serde(rename = "use")]
    pub invoice_use: Option<InvoiceUse>,
    pub folio_number: Option<Value>,
    pub series: Option<String>,
    #[serde(default)]
    pub items: Vec<Value>,
    pub address: Option<Address>,
    pub verification_url: Option<String>,
    pub cancellation_status: Option<CancellationStatus>,
    pub external_id: Option<String>,
    pub idempotency_key: Option<String>,
    pub stamp: Option<Stamp>,
    pub related_documents: Option<Vec<Value>>,
}

/// SAT stamp of a valid invoice
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stamp {
    pub date: String,
    pub sat_signature: String,
    pub sat_cert_number: String,
    pub signature: String,
    pub complement_string: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::QueryParams;

    #[test]
    fn test_cancel_options_as_query() {
        let options = CancelInvoiceOptions::new(CancellationMotive::ErroresConRelacion)
            .with_substitution("a1b2");
        let query = QueryParams::from_serialize(&options).unwrap();
        assert_eq!(query.encode(), "motive=01&substitution=a1b2");

        let bare = CancelInvoiceOptions::new(CancellationMotive::NoSeConcreto);
        assert_eq!(QueryParams::from_serialize(&bare).unwrap().encode(), "motive=03");
    }

    #[test]
    fn test_invoice_deserialize() {
        let json = r#"{
            "id": "inv_1",
            "livemode": false,
            "type": "I",
            "status": "valid",
            "payment_form": "03",
            "payment_method": "PUE",
            "total": 1160.0,
            "use": "G03",
            "folio_number": 42,
            "items": [],
            "cancellation_status": "none",
            "stamp": {
                "date": "2024-01-01T00:00:00",
                "sat_signature": "abc",
                "sat_cert_number": "0001",
                "signature": "def",
                "complement_string": "||1.1||"
            }
        }"#;

        let invoice: Invoice = serde_json::from_str(json).unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Valid);
        assert_eq!(invoice.invoice_use, Some(InvoiceUse::GastosEnGeneral));
        assert_eq!(invoice.cancellation_status, Some(CancellationStatus::None));
        assert_eq!(invoice.stamp.unwrap().sat_cert_number, "0001");
    }

    #[tokio::test]
    async fn test_download_requires_id() {
        let client = FacturapiClient::new("sk_test_abc").unwrap();
        let err = client.invoices().download_pdf("").await.unwrap_err();
        assert_eq!(err.to_string(), "id is required");
    }
}
