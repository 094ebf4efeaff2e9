//! Main API client implementation

use crate::config::ClientConfig;
use crate::endpoints::{
    CatalogsApi, CustomersApi, InvoicesApi, OrganizationsApi, ProductsApi, ReceiptsApi,
    RetentionsApi, ToolsApi, WebhooksApi,
};
use crate::error::{ApiError, ApiResult, ErrorContext};
use crate::request::{build_url, RequestDescriptor, RequestOptions, RequestPayload};
use crate::response::{collect, error_message, ApiResponse, BinaryBody, ContentKind};
use crate::transport::{HttpTransport, ReqwestTransport, Runtime, TransportBody, TransportRequest};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::Method;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Request correlation ID header
const X_REQUEST_ID: &str = "X-Request-ID";

/// `Basic` Authorization value for an API key: `Basic base64(key + ":")`
#[must_use]
pub fn basic_auth_value(api_key: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{api_key}:")))
}

/// Facturapi API client
///
/// Cheap to clone; clones share the transport and credentials but own their
/// base URL. Holds no per-request state, so one instance can serve many
/// concurrent calls.
#[derive(Clone)]
pub struct FacturapiClient {
    transport: Arc<dyn HttpTransport>,
    config: Arc<ClientConfig>,
    default_headers: HeaderMap,
    base_url: String,
}

impl FacturapiClient {
    /// Create a client for an API key with the default API version
    pub fn new(api_key: impl Into<String>) -> ApiResult<Self> {
        Self::with_config(ClientConfig::new(api_key))
    }

    /// Create a client from environment variables
    pub fn from_env() -> ApiResult<Self> {
        Self::with_config(ClientConfig::from_env()?)
    }

    /// Create a client with specific configuration and the `reqwest` transport
    pub fn with_config(config: ClientConfig) -> ApiResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.timeout)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client with a custom transport adapter
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> ApiResult<Self> {
        config.validate()?;

        let mut default_headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&basic_auth_value(&config.api_key))
            .map_err(|_| ApiError::config("api_key contains characters not allowed in a header"))?;
        auth.set_sensitive(true);
        default_headers.insert(AUTHORIZATION, auth);

        if let Ok(value) = HeaderValue::from_str(&config.user_agent) {
            default_headers.insert(USER_AGENT, value);
        }

        let base_url = config.resolved_base_url();

        Ok(Self {
            transport,
            config: Arc::new(config),
            default_headers,
            base_url,
        })
    }

    /// Get the current configuration
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the base URL used for the next request
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Replace the base URL (e.g. to point at a mock server)
    pub fn set_base_url(&mut self, url: impl Into<String>) {
        self.base_url = url.into();
    }

    /// The Authorization header value sent with every request
    #[must_use]
    pub fn authorization(&self) -> Option<&HeaderValue> {
        self.default_headers.get(AUTHORIZATION)
    }

    /// Runtime of the underlying transport
    #[must_use]
    pub fn runtime(&self) -> Runtime {
        self.transport.runtime()
    }

    // -------------------------------------------------------------------------
    // Endpoint API accessors
    // -------------------------------------------------------------------------

    /// Access customer endpoints
    #[must_use]
    pub fn customers(&self) -> CustomersApi {
        CustomersApi::new(self.clone())
    }

    /// Access product endpoints
    #[must_use]
    pub fn products(&self) -> ProductsApi {
        ProductsApi::new(self.clone())
    }

    /// Access invoice endpoints
    #[must_use]
    pub fn invoices(&self) -> InvoicesApi {
        InvoicesApi::new(self.clone())
    }

    /// Access organization endpoints
    #[must_use]
    pub fn organizations(&self) -> OrganizationsApi {
        OrganizationsApi::new(self.clone())
    }

    /// Access receipt endpoints
    #[must_use]
    pub fn receipts(&self) -> ReceiptsApi {
        ReceiptsApi::new(self.clone())
    }

    /// Access retention endpoints
    #[must_use]
    pub fn retentions(&self) -> RetentionsApi {
        RetentionsApi::new(self.clone())
    }

    /// Access webhook endpoints and signature validation
    #[must_use]
    pub fn webhooks(&self) -> WebhooksApi {
        WebhooksApi::new(self.clone())
    }

    /// Access SAT catalog searches
    #[must_use]
    pub fn catalogs(&self) -> CatalogsApi {
        CatalogsApi::new(self.clone())
    }

    /// Access tools endpoints
    #[must_use]
    pub fn tools(&self) -> ToolsApi {
        ToolsApi::new(self.clone())
    }

    // -------------------------------------------------------------------------
    // HTTP verbs
    // -------------------------------------------------------------------------

    /// Perform a GET request
    pub async fn get(&self, path: &str, options: RequestOptions) -> ApiResult<ApiResponse> {
        self.execute(RequestDescriptor::new(Method::GET, path, options)).await
    }

    /// Perform a POST request
    pub async fn post(&self, path: &str, options: RequestOptions) -> ApiResult<ApiResponse> {
        self.execute(RequestDescriptor::new(Method::POST, path, options)).await
    }

    /// Perform a PUT request
    pub async fn put(&self, path: &str, options: RequestOptions) -> ApiResult<ApiResponse> {
        self.execute(RequestDescriptor::new(Method::PUT, path, options)).await
    }

    /// Perform a DELETE request
    pub async fn delete(&self, path: &str, options: RequestOptions) -> ApiResult<ApiResponse> {
        self.execute(RequestDescriptor::new(Method::DELETE, path, options)).await
    }

    /// Perform a request and deserialize its JSON body
    pub async fn json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        self.execute(RequestDescriptor::new(method, path, options))
            .await?
            .into_json()
    }

    /// Perform a GET request for a binary download
    pub async fn download(&self, path: &str) -> ApiResult<BinaryBody> {
        self.get(path, RequestOptions::new()).await?.into_binary()
    }

    /// Execute a request descriptor
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path, request_id))]
    pub async fn execute(&self, request: RequestDescriptor) -> ApiResult<ApiResponse> {
        let request_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("request_id", request_id.as_str());

        let context = ErrorContext {
            request_id: Some(request_id.clone()),
            path: request.path.clone(),
            method: request.method.to_string(),
        };

        let url = build_url(&self.base_url, &request.path, &request.params);

        let mut headers = self.default_headers.clone();
        if let Ok(value) = HeaderValue::from_str(&request_id) {
            headers.insert(X_REQUEST_ID, value);
        }
        if !request.payload.is_multipart() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        let body = match request.payload {
            RequestPayload::None => None,
            RequestPayload::Json(value) => Some(TransportBody::Json(serde_json::to_string(&value)?)),
            RequestPayload::Multipart(form) => Some(TransportBody::Multipart(form)),
        };

        debug!(url = %url, "Dispatching request");
        let start = Instant::now();

        let response = self
            .transport
            .send(TransportRequest {
                method: request.method,
                url,
                headers,
                body,
            })
            .await
            .inspect_err(|e| warn!(context = %context, error = %e, "Transport failure"))?;

        let status = response.status;
        debug!(
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis(),
            "Response received"
        );

        if !status.is_success() {
            let raw = collect(response.body).await.unwrap_or_default();
            let message = error_message(status, &raw);
            warn!(context = %context, status = status.as_u16(), message = %message, "API error");
            return Err(ApiError::api_response(status.as_u16(), message));
        }

        let content_type = response.content_type;
        match ContentKind::classify(content_type.as_deref()) {
            ContentKind::Binary if self.runtime().streams_binary() => Ok(ApiResponse::Binary(BinaryBody::Stream {
                content_type,
                stream: response.body,
            })),
            ContentKind::Binary => Ok(ApiResponse::Binary(BinaryBody::Blob {
                content_type,
                bytes: collect(response.body).await?,
            })),
            ContentKind::Json => {
                let raw = collect(response.body).await?;
                Ok(ApiResponse::Json(serde_json::from_slice(&raw)?))
            }
            ContentKind::Text => {
                let raw = collect(response.body).await?;
                // Undecodable bytes become U+FFFD; a text body never fails the call.
                Ok(ApiResponse::Text(String::from_utf8_lossy(&raw).into_owned()))
            }
        }
    }
}

/// Reject empty identifiers before any request is made
pub(crate) fn require_id(id: &str) -> ApiResult<&str> {
    if id.trim().is_empty() {
        Err(ApiError::id_required())
    } else {
        Ok(id)
    }
}
