//! Tools API endpoints

use crate::client::FacturapiClient;
use crate::error::{ApiError, ApiResult};
use crate::request::{QueryParams, RequestOptions};
use reqwest::Method;
use serde_json::Value;

/// Tools API interface
#[derive(Clone)]
pub struct ToolsApi {
    client: FacturapiClient,
}

impl ToolsApi {
    /// Create a new tools API interface
    pub(crate) fn new(client: FacturapiClient) -> Self {
        Self { client }
    }

    /// Check an RFC against the SAT registry
    ///
    /// GET /tools/tax_id_validation?tax_id=..
    pub async fn validate_tax_id(&self, tax_id: &str) -> ApiResult<Value> {
        if tax_id.trim().is_empty() {
            return Err(ApiError::validation("tax_id is required"));
        }
        let query = QueryParams::new().with("tax_id", tax_id);
        self.client
            .json(
                Method::GET,
                "/tools/tax_id_validation",
                RequestOptions::new().query(query),
            )
            .await
    }
}
