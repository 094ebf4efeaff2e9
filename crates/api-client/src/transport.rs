//! Network capability behind the client
//!
//! [`HttpTransport`] is the seam between request execution and the network
//! primitive of the runtime. [`ReqwestTransport`] is the default adapter.

use crate::error::{ApiError, ApiResult};
use crate::request::{MultipartForm, PartData};
use async_trait::async_trait;
use bytes::Bytes;
use futures::{Stream, StreamExt};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Client, Method, StatusCode};
use std::pin::Pin;
use std::time::Duration;

/// Body chunks of a response
pub type ByteStream = Pin<Box<dyn Stream<Item = ApiResult<Bytes>> + Send>>;

/// Execution environment of a transport
///
/// Decides how binary downloads are delivered: server runtimes hand out an
/// unbuffered stream, browser and bridge runtimes a buffered blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runtime {
    /// Native process with streaming I/O
    Server,
    /// Browser (`wasm32`) fetch
    Browser,
    /// Mobile bridge runtime
    Bridge,
}

impl Runtime {
    /// Runtime of the current compilation target
    #[must_use]
    pub const fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Browser
        } else {
            Self::Server
        }
    }

    /// Whether binary bodies are streamed rather than buffered
    #[must_use]
    pub const fn streams_binary(self) -> bool {
        matches!(self, Self::Server)
    }
}

/// Body handed to a transport
#[derive(Debug, Clone)]
pub enum TransportBody {
    /// Serialized JSON text
    Json(String),
    /// Multipart form; the adapter sets the content type with its boundary
    Multipart(MultipartForm),
}

/// Fully resolved request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL including the query string
    pub url: String,
    /// Headers, including Authorization
    pub headers: HeaderMap,
    /// Optional body
    pub body: Option<TransportBody>,
}

/// Raw response from a transport
pub struct TransportResponse {
    /// HTTP status
    pub status: StatusCode,
    /// `Content-Type` header, if any
    pub content_type: Option<String>,
    /// Body chunks
    pub body: ByteStream,
}

impl TransportResponse {
    /// Build a response from a fully buffered body
    pub fn buffered(status: StatusCode, content_type: Option<&str>, body: impl Into<Bytes>) -> Self {
        let chunk: ApiResult<Bytes> = Ok(body.into());
        Self {
            status,
            content_type: content_type.map(str::to_string),
            body: Box::pin(futures::stream::once(async move { chunk })),
        }
    }
}

/// Network primitive used by [`crate::FacturapiClient`]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Dispatch one request
    async fn send(&self, request: TransportRequest) -> ApiResult<TransportResponse>;

    /// Runtime this adapter runs in
    fn runtime(&self) -> Runtime {
        Runtime::current()
    }
}

/// [`HttpTransport`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: Client,
}

impl ReqwestTransport {
    /// Build a transport with an optional request timeout
    pub fn new(timeout: Option<Duration>) -> ApiResult<Self> {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        let inner = builder.build().map_err(ApiError::Transport)?;
        Ok(Self { inner })
    }

    /// Wrap an existing `reqwest` client
    #[must_use]
    pub fn from_client(inner: Client) -> Self {
        Self { inner }
    }
}

fn to_reqwest_form(form: MultipartForm) -> ApiResult<reqwest::multipart::Form> {
    let mut out = reqwest::multipart::Form::new();
    for part in form.into_parts() {
        out = match part.data {
            PartData::Text(value) => out.text(part.name, value),
            PartData::File {
                bytes,
                file_name,
                content_type,
            } => {
                let mut file = reqwest::multipart::Part::bytes(bytes.to_vec()).file_name(file_name);
                if let Some(mime) = content_type {
                    file = file.mime_str(&mime)?;
                }
                out.part(part.name, file)
            }
        };
    }
    Ok(out)
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> ApiResult<TransportResponse> {
        let mut builder = self
            .inner
            .request(request.method, &request.url)
            .headers(request.headers);

        builder = match request.body {
            Some(TransportBody::Json(text)) => builder.body(text),
            Some(TransportBody::Multipart(form)) => builder.multipart(to_reqwest_form(form)?),
            None => builder,
        };

        let response = builder.send().await?;
        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        #[cfg(not(target_arch = "wasm32"))]
        let body: ByteStream = Box::pin(response.bytes_stream().map(|chunk| chunk.map_err(ApiError::from)));

        #[cfg(target_arch = "wasm32")]
        let body: ByteStream = {
            let bytes = response.bytes().await?;
            Box::pin(futures::stream::once(async move { Ok::<_, ApiError>(bytes) }))
        };

        Ok(TransportResponse {
            status,
            content_type,
            body,
        })
    }
}
