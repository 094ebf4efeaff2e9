//! Customers API endpoints
//!
//! Maps to `/customers`:
//! - Create, list, retrieve, update and delete customers
//! - Validate a customer's tax information against the SAT

use super::common::{Address, SearchResult};
use crate::client::{require_id, FacturapiClient};
use crate::enums::{InvoiceUse, TaxSystem};
use crate::error::ApiResult;
use crate::request::RequestOptions;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Customers API interface
#[derive(Clone)]
pub struct CustomersApi {
    client: FacturapiClient,
}

impl CustomersApi {
    /// Create a new customers API interface
    pub(crate) fn new(client: FacturapiClient) -> Self {
        Self { client }
    }

    /// Create a new customer in your organization
    ///
    /// POST /customers
    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> ApiResult<Customer> {
        self.client
            .json(Method::POST, "/customers", RequestOptions::new().body(data)?)
            .await
    }

    /// List customers, paginated
    ///
    /// GET /customers
    pub async fn list<P: Serialize + ?Sized>(&self, params: &P) -> ApiResult<SearchResult<Customer>> {
        self.client
            .json(Method::GET, "/customers", RequestOptions::new().params(params)?)
            .await
    }

    /// Get a single customer
    ///
    /// GET /customers/{id}
    pub async fn retrieve(&self, id: &str) -> ApiResult<Customer> {
        let id = require_id(id)?;
        self.client
            .json(Method::GET, &format!("/customers/{id}"), RequestOptions::new())
            .await
    }

    /// Update a customer
    ///
    /// PUT /customers/{id}
    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, data: &B) -> ApiResult<Customer> {
        let id = require_id(id)?;
        self.client
            .json(Method::PUT, &format!("/customers/{id}"), RequestOptions::new().body(data)?)
            .await
    }

    /// Permanently remove a customer
    ///
    /// DELETE /customers/{id}
    pub async fn delete(&self, id: &str) -> ApiResult<Customer> {
        let id = require_id(id)?;
        self.client
            .json(Method::DELETE, &format!("/customers/{id}"), RequestOptions::new())
            .await
    }

    /// Validate a customer's tax information
    ///
    /// GET /customers/{id}/tax-info-validation
    pub async fn validate_tax_info(&self, id: &str) -> ApiResult<TaxInfoValidation> {
        let id = require_id(id)?;
        self.client
            .json(
                Method::GET,
                &format!("/customers/{id}/tax-info-validation"),
                RequestOptions::new(),
            )
            .await
    }
}

/// Customer entity
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub livemode: bool,
    pub organization: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub tax_id: String,
    pub tax_system: Option<TaxSystem>,
    pub legal_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub curp: Option<String>,
    pub address: Option<Address>,
    pub external_id: Option<String>,
    pub default_invoice_use: Option<InvoiceUse>,
}

/// Result of a tax information check
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxInfoValidation {
    pub is_valid: bool,
    #[serde(default)]
    pub errors: Vec<TaxInfoValidationError>,
}

/// One problem found while validating tax information
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxInfoValidationError {
    pub path: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_deserialize() {
        let json = r#"{
            "id": "5e8a6b5c",
            "livemode": false,
            "organization": "org_1",
            "created_at": "2024-01-01T00:00:00.000Z",
            "tax_id": "XAXX010101000",
            "tax_system": "616",
            "legal_name": "PUBLICO EN GENERAL",
            "email": "cliente@example.com",
            "address": { "zip": "86991", "country": "MEX" },
            "default_invoice_use": "S01"
        }"#;

        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.tax_id, "XAXX010101000");
        assert_eq!(customer.tax_system, Some(TaxSystem::SinObligacionesFiscales));
        assert_eq!(customer.default_invoice_use, Some(InvoiceUse::SinEfectosFiscales));
        assert_eq!(customer.address.unwrap().zip, "86991");
    }

    #[tokio::test]
    async fn test_retrieve_requires_id() {
        let client = FacturapiClient::new("sk_test_abc").unwrap();
        let err = client.customers().retrieve("").await.unwrap_err();
        assert_eq!(err.to_string(), "id is required");
    }
}
