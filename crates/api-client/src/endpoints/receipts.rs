//! Receipts API endpoints
//!
//! Receipts are self-invoiceable sale tickets that can later be turned into
//! an invoice by the customer, or grouped into a global invoice.

use super::common::{GenericResponse, SearchResult, SendEmailBody};
use super::invoices::Invoice;
use crate::client::{require_id, FacturapiClient};
use crate::enums::{PaymentForm, ReceiptStatus};
use crate::error::ApiResult;
use crate::request::RequestOptions;
use crate::response::BinaryBody;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Receipts API interface
#[derive(Clone)]
pub struct ReceiptsApi {
    client: FacturapiClient,
}

impl ReceiptsApi {
    /// Create a new receipts API interface
    pub(crate) fn new(client: FacturapiClient) -> Self {
        Self { client }
    }

    /// Create a new receipt
    ///
    /// POST /receipts
    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> ApiResult<Receipt> {
        self.client
            .json(Method::POST, "/receipts", RequestOptions::new().body(data)?)
            .await
    }

    /// List receipts, paginated
    ///
    /// GET /receipts
    pub async fn list<P: Serialize + ?Sized>(&self, params: &P) -> ApiResult<SearchResult<Receipt>> {
        self.client
            .json(Method::GET, "/receipts", RequestOptions::new().params(params)?)
            .await
    }

    /// Get a single receipt
    ///
    /// GET /receipts/{id}
    pub async fn retrieve(&self, id: &str) -> ApiResult<Receipt> {
        let id = require_id(id)?;
        self.client
            .json(Method::GET, &format!("/receipts/{id}"), RequestOptions::new())
            .await
    }

    /// Create an invoice for this receipt
    ///
    /// POST /receipts/{id}/invoice
    pub async fn invoice<B: Serialize + ?Sized>(&self, id: &str, data: &B) -> ApiResult<Invoice> {
        let id = require_id(id)?;
        self.client
            .json(
                Method::POST,
                &format!("/receipts/{id}/invoice"),
                RequestOptions::new().body(data)?,
            )
            .await
    }

    /// Create a global invoice from open receipts
    ///
    /// POST /receipts/global-invoice
    pub async fn create_global_invoice<B: Serialize + ?Sized>(&self, data: &B) -> ApiResult<Invoice> {
        self.client
            .json(
                Method::POST,
                "/receipts/global-invoice",
                RequestOptions::new().body(data)?,
            )
            .await
    }

    /// Cancel a receipt
    ///
    /// DELETE /receipts/{id}
    pub async fn cancel(&self, id: &str) -> ApiResult<Receipt> {
        let id = require_id(id)?;
        self.client
            .json(Method::DELETE, &format!("/receipts/{id}"), RequestOptions::new())
            .await
    }

    /// Email the receipt
    ///
    /// POST /receipts/{id}/email
    pub async fn send_by_email(&self, id: &str, options: &SendEmailBody) -> ApiResult<GenericResponse> {
        let id = require_id(id)?;
        self.client
            .json(
                Method::POST,
                &format!("/receipts/{id}/email"),
                RequestOptions::new().body(options)?,
            )
            .await
    }

    /// Download the receipt PDF
    ///
    /// GET /receipts/{id}/pdf
    pub async fn download_pdf(&self, id: &str) -> ApiResult<BinaryBody> {
        let id = require_id(id)?;
        self.client.download(&format!("/receipts/{id}/pdf")).await
    }
}

/// Receipt entity
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub livemode: bool,
    pub organization: Option<String>,
    pub folio_number: Option<u64>,
    pub external_id: Option<String>,
    pub idempotency_key: Option<String>,
    pub branch: Option<String>,
    pub payment_form: Option<PaymentForm>,
    #[serde(default)]
    pub items: Vec<Value>,
    pub currency: Option<String>,
    pub exchange: Option<f64>,
    pub total: f64,
    pub invoice: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub key: Option<String>,
    pub status: ReceiptStatus,
    pub self_invoice_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_deserialize() {
        let json = r#"{
            "id": "rec_1",
            "payment_form": "01",
            "total": 116.0,
            "status": "invoiced_globally",
            "self_invoice_url": "https://factura.space/acme/rec_1"
        }"#;
        let receipt: Receipt = serde_json::from_str(json).unwrap();
        assert_eq!(receipt.status, ReceiptStatus::InvoicedGlobally);
        assert_eq!(receipt.payment_form, Some(PaymentForm::Efectivo));
    }
}
