//! Webhooks API endpoints and event types

use super::common::SearchResult;
use crate::client::{require_id, FacturapiClient};
use crate::enums::{ApiEventType, WebhookStatus};
use crate::error::ApiResult;
use crate::request::RequestOptions;
use crate::webhook::{WebhookPayload, WebhookVerifier};
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Webhooks API interface
#[derive(Clone)]
pub struct WebhooksApi {
    client: FacturapiClient,
}

impl WebhooksApi {
    /// Create a new webhooks API interface
    pub(crate) fn new(client: FacturapiClient) -> Self {
        Self { client }
    }

    /// Register a webhook endpoint
    ///
    /// POST /webhooks
    pub async fn create<B: Serialize + ?Sized>(&self, data: &B) -> ApiResult<Webhook> {
        self.client
            .json(Method::POST, "/webhooks", RequestOptions::new().body(data)?)
            .await
    }

    /// List webhooks, paginated
    ///
    /// GET /webhooks
    pub async fn list<P: Serialize + ?Sized>(&self, params: &P) -> ApiResult<SearchResult<Webhook>> {
        self.client
            .json(Method::GET, "/webhooks", RequestOptions::new().params(params)?)
            .await
    }

    /// Get a single webhook
    ///
    /// GET /webhooks/{id}
    pub async fn retrieve(&self, id: &str) -> ApiResult<Webhook> {
        let id = require_id(id)?;
        self.client
            .json(Method::GET, &format!("/webhooks/{id}"), RequestOptions::new())
            .await
    }

    /// Update a webhook
    ///
    /// PUT /webhooks/{id}
    pub async fn update<B: Serialize + ?Sized>(&self, id: &str, data: &B) -> ApiResult<Webhook> {
        let id = require_id(id)?;
        self.client
            .json(Method::PUT, &format!("/webhooks/{id}"), RequestOptions::new().body(data)?)
            .await
    }

    /// Delete a webhook
    ///
    /// DELETE /webhooks/{id}
    pub async fn delete(&self, id: &str) -> ApiResult<Webhook> {
        let id = require_id(id)?;
        self.client
            .json(Method::DELETE, &format!("/webhooks/{id}"), RequestOptions::new())
            .await
    }

    /// Verify a webhook delivery locally and return the parsed event
    ///
    /// `signature` is the value of the `Facturapi-Signature` header. See
    /// [`WebhookVerifier`] for the checks performed.
    pub async fn validate_signature(
        &self,
        secret: &str,
        signature: &str,
        payload: impl Into<WebhookPayload>,
    ) -> ApiResult<ApiEvent> {
        WebhookVerifier::local().verify(secret, signature, payload).await
    }
}

/// Webhook endpoint registration
#[allow(missing_docs)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub livemode: bool,
    pub organization: Option<String>,
    pub url: String,
    #[serde(default)]
    pub enabled_events: Vec<String>,
    pub status: Option<WebhookStatus>,
}

/// Event delivered to a webhook endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEvent<T = Value> {
    /// Event id
    pub id: Option<String>,
    /// Event type code, e.g. `invoice.status_updated`
    #[serde(rename = "type")]
    pub event_type: String,
    /// Organization the event belongs to
    pub organization: Option<String>,
    /// Whether the event comes from live mode
    pub livemode: Option<bool>,
    /// When the event was created
    pub created_at: Option<DateTime<Utc>>,
    /// Object the event is about
    pub data: Option<ApiEventData<T>>,
}

impl<T> ApiEvent<T> {
    /// Known event type, if the API sent one this crate recognizes
    #[must_use]
    pub fn kind(&self) -> Option<ApiEventType> {
        ApiEventType::from_code(&self.event_type)
    }
}

/// Object carried by an event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEventData<T = Value> {
    /// Object type, e.g. `invoice`
    #[serde(rename = "type")]
    pub data_type: String,
    /// The object itself
    pub object: T,
}
