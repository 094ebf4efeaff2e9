//! Response classification and decoded bodies

use crate::error::{ApiError, ApiResult};
use crate::transport::ByteStream;
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// How a successful response body is decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Parsed as JSON
    Json,
    /// Handed over as a stream or blob, never parsed
    Binary,
    /// Returned as text
    Text,
}

impl ContentKind {
    /// Classify a `Content-Type` header value
    ///
    /// | media type | kind |
    /// |------------|------|
    /// | `application/json`, `*/*+json` | `Json` |
    /// | `image/*`, `application/pdf` | `Binary` |
    /// | `application/xml`, `text/xml`, `*/*+xml` | `Binary` |
    /// | `application/zip`, `application/x-zip-compressed`, `application/octet-stream` | `Binary` |
    /// | anything else, or no header | `Text` |
    #[must_use]
    pub fn classify(content_type: Option<&str>) -> Self {
        let Some(raw) = content_type else {
            return Self::Text;
        };
        let media = raw
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        let (kind, subtype) = media.split_once('/').unwrap_or((media.as_str(), ""));

        match (kind, subtype) {
            ("application", "json") => Self::Json,
            (_, sub) if sub.ends_with("+json") => Self::Json,
            ("image", _) => Self::Binary,
            ("application", "pdf" | "xml" | "zip" | "x-zip-compressed" | "octet-stream") => {
                Self::Binary
            }
            ("text", "xml") => Self::Binary,
            (_, sub) if sub.ends_with("+xml") => Self::Binary,
            _ => Self::Text,
        }
    }
}

/// Binary download, shaped for the runtime that performed it
pub enum BinaryBody {
    /// Unbuffered byte stream (server runtimes)
    Stream {
        /// Declared content type
        content_type: Option<String>,
        /// Body chunks
        stream: ByteStream,
    },
    /// Fully buffered body (browser and bridge runtimes)
    Blob {
        /// Declared content type
        content_type: Option<String>,
        /// Body bytes
        bytes: Bytes,
    },
}

impl fmt::Debug for BinaryBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream { content_type, .. } => f
                .debug_struct("Stream")
                .field("content_type", content_type)
                .finish_non_exhaustive(),
            Self::Blob { content_type, bytes } => f
                .debug_struct("Blob")
                .field("content_type", content_type)
                .field("len", &bytes.len())
                .finish(),
        }
    }
}

impl BinaryBody {
    /// Declared content type
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        match self {
            Self::Stream { content_type, .. } | Self::Blob { content_type, .. } => {
                content_type.as_deref()
            }
        }
    }

    /// Whether the body is still an unconsumed stream
    #[must_use]
    pub fn is_stream(&self) -> bool {
        matches!(self, Self::Stream { .. })
    }

    /// Buffer the whole body into memory
    pub async fn into_bytes(self) -> ApiResult<Bytes> {
        match self {
            Self::Blob { bytes, .. } => Ok(bytes),
            Self::Stream { stream, .. } => collect(stream).await,
        }
    }

    /// Copy the body into `writer` chunk by chunk, returning the byte count
    pub async fn write_to<W>(self, writer: &mut W) -> ApiResult<u64>
    where
        W: AsyncWrite + Unpin + ?Sized,
    {
        let mut written = 0u64;
        match self {
            Self::Blob { bytes, .. } => {
                writer.write_all(&bytes).await?;
                written += bytes.len() as u64;
            }
            Self::Stream { mut stream, .. } => {
                while let Some(chunk) = stream.next().await {
                    let chunk = chunk?;
                    writer.write_all(&chunk).await?;
                    written += chunk.len() as u64;
                }
            }
        }
        writer.flush().await?;
        Ok(written)
    }
}

/// Successful response decoded according to its [`ContentKind`]
#[derive(Debug)]
pub enum ApiResponse {
    /// Parsed JSON
    Json(Value),
    /// PDF/XML/ZIP/image payload
    Binary(BinaryBody),
    /// Any other body
    Text(String),
}

impl ApiResponse {
    /// Which decode branch produced this response
    #[must_use]
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Json(_) => ContentKind::Json,
            Self::Binary(_) => ContentKind::Binary,
            Self::Text(_) => ContentKind::Text,
        }
    }

    /// Deserialize a JSON response into `T`
    ///
    /// Text bodies are parsed as JSON as a fallback; binary bodies are an
    /// error.
    pub fn into_json<T: DeserializeOwned>(self) -> ApiResult<T> {
        match self {
            Self::Json(value) => Ok(serde_json::from_value(value)?),
            Self::Text(text) => Ok(serde_json::from_str(&text)?),
            Self::Binary(body) => Err(unexpected("JSON", &body)),
        }
    }

    /// Take the binary body
    ///
    /// A JSON or text answer on a download endpoint is returned as a blob
    /// so callers always get bytes.
    pub fn into_binary(self) -> ApiResult<BinaryBody> {
        match self {
            Self::Binary(body) => Ok(body),
            Self::Json(value) => Ok(BinaryBody::Blob {
                content_type: Some("application/json".to_string()),
                bytes: Bytes::from(serde_json::to_vec(&value)?),
            }),
            Self::Text(text) => Ok(BinaryBody::Blob {
                content_type: Some("text/plain".to_string()),
                bytes: Bytes::from(text),
            }),
        }
    }

    /// Take the body as text
    pub fn into_text(self) -> ApiResult<String> {
        match self {
            Self::Text(text) => Ok(text),
            Self::Json(value) => Ok(value.to_string()),
            Self::Binary(body) => Err(unexpected("text", &body)),
        }
    }
}

fn unexpected(wanted: &str, body: &BinaryBody) -> ApiError {
    ApiError::validation(format!(
        "expected a {wanted} response, got binary content ({})",
        body.content_type().unwrap_or("unknown type")
    ))
}

/// Drain a byte stream into one buffer
pub(crate) async fn collect(mut stream: ByteStream) -> ApiResult<Bytes> {
    let mut buffer = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    Ok(buffer.freeze())
}

/// Human-readable message for a failed response
///
/// Uses the `message` field of a JSON error body; falls back to the status
/// reason phrase, then to `HTTP <code>`.
#[must_use]
pub fn error_message(status: StatusCode, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| match value.get("message") {
            Some(Value::String(message)) if !message.is_empty() => Some(message.clone()),
            _ => None,
        })
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}
