//! Products API endpoints

use super::common::SearchResult;
use crate::client::{require_id, FacturapiClient};
use crate::enums::{TaxFactor, TaxType};
use crate::error::ApiResult;
use crate::request::RequestOptions;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Products API interface
#[derive(Clone)]
pub struct ProductsApi {
    client: FacturapiClient,
}

impl ProductsApi {
    /// Create a new products API interface
    pub(crate) fn new(client: FacturapiClient) -> Self {
        Self { client }
    }

    /// Create a new product
    ///
    /// POST /products
    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> ApiResult<Product> {
        self.client
            .json(Method::POST, "/products", RequestOptions::new().body(data)?)
            .await
    }

    /// List products, paginated
    ///
    /// GET /products
    pub async fn list<P: Serialize + ?Sized>(&self, params: &P) -> ApiResult<SearchResult<Product>> {
        self.client
            .json(Method::GET, "/products", RequestOptions::new().params(params)?)
            .await
    }

    /// Get a single product
    ///
    /// GET /products/{id}
    pub async fn retrieve(&self, id: &str) -> ApiResult<Product> {
        let id = require_id(id)?;
        self.client
            .json(Method::GET, &format!("/products/{id}"), RequestOptions::new())
            .await
    }

    /// Update a product
    ///
    /// PUT /products/{id}
    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, data: &B) -> ApiResult<Product> {
        let id = require_id(id)?;
        self.client
            .json(Method::PUT, &format!("/products/{id}"), RequestOptions::new().body(data)?)
            .await
    }

    /// Permanently remove a product
    ///
    /// DELETE /products/{id}
    pub async fn delete(&self, id: &str) -> ApiResult<Product> {
        let id = require_id(id)?;
        self.client
            .json(Method::DELETE, &format!("/products/{id}"), RequestOptions::new())
            .await
    }
}

/// Product entity
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub organization: Option<String>,
    #[serde(default)]
    pub livemode: bool,
    pub product_key: String,
    pub description: String,
    pub price: f64,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default = "default_true")]
    pub tax_included: bool,
    pub taxability: Option<String>,
    #[serde(default)]
    pub taxes: Vec<Tax>,
    #[serde(default)]
    pub local_taxes: Vec<LocalTax>,
    pub unit_key: Option<String>,
    pub unit_name: Option<String>,
    pub sku: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Federal tax applied to a product
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tax {
    pub base: Option<f64>,
    pub rate: f64,
    #[serde(rename = "type")]
    pub tax_type: TaxType,
    #[serde(default)]
    pub withholding: bool,
    pub factor: Option<TaxFactor>,
    pub ieps_mode: Option<String>,
}

/// Local (state) tax applied to a product
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalTax {
    pub rate: f64,
    #[serde(rename = "type")]
    pub tax_type: String,
    #[serde(default)]
    pub withholding: bool,
    pub base: Option<f64>,
    pub factor: Option<TaxFactor>,
}
