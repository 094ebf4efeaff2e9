//! Request descriptors, query encoding and multipart payloads

use crate::error::{ApiError, ApiResult};
use bytes::Bytes;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

/// Ordered query-string parameters
///
/// Values are already rendered to strings. Built from any serializable map
/// through [`QueryParams::from_serialize`]:
/// - `null` values are dropped
/// - strings, numbers and booleans are written as-is
/// - arrays and objects are written as compact JSON
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Empty parameter set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build parameters from a serializable map-like value
    ///
    /// `()` and `None` produce an empty set. Anything that does not
    /// serialize to a JSON object is rejected.
    pub fn from_serialize<T: Serialize + ?Sized>(params: &T) -> ApiResult<Self> {
        match serde_json::to_value(params)? {
            Value::Null => Ok(Self::new()),
            Value::Object(map) => Ok(map
                .into_iter()
                .fold(Self::new(), |acc, (key, value)| acc.with_value(key, value))),
            other => Err(ApiError::validation(format!(
                "query parameters must be an object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Append a string parameter
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((key.into(), value.into()));
        self
    }

    /// Append a JSON value, applying the scalar rendering rules
    #[must_use]
    pub fn with_value(mut self, key: impl Into<String>, value: Value) -> Self {
        let rendered = match value {
            Value::Null => return self,
            Value::String(s) => s,
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
        };
        self.pairs.push((key.into(), rendered));
        self
    }

    /// Whether no parameters are set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Parameter pairs in insertion order
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// `application/x-www-form-urlencoded` rendering, without the leading `?`
    #[must_use]
    pub fn encode(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Build the full request URL: base + path + optional `?query`
#[must_use]
pub fn build_url(base_url: &str, path: &str, query: &QueryParams) -> String {
    let base = base_url.trim_end_matches('/');
    let mut url = if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    };
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query.encode());
    }
    url
}

/// Content of one multipart field
#[derive(Debug, Clone)]
pub enum PartData {
    /// Plain text field
    Text(String),
    /// File upload
    File {
        /// File contents
        bytes: Bytes,
        /// File name announced to the server
        file_name: String,
        /// Optional MIME type
        content_type: Option<String>,
    },
}

/// One field of a multipart form
#[derive(Debug, Clone)]
pub struct FormPart {
    /// Field name
    pub name: String,
    /// Field content
    pub data: PartData,
}

/// Runtime-neutral `multipart/form-data` payload
///
/// Transport adapters convert it into their native form type and supply the
/// boundary themselves.
#[derive(Debug, Clone, Default)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    /// Empty form
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    #[must_use]
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            data: PartData::Text(value.into()),
        });
        self
    }

    /// Append a file field
    #[must_use]
    pub fn file(
        mut self,
        name: impl Into<String>,
        file_name: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            data: PartData::File {
                bytes: bytes.into(),
                file_name: file_name.into(),
                content_type: None,
            },
        });
        self
    }

    /// Fields in insertion order
    #[must_use]
    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    /// Consume the form, yielding its fields
    #[must_use]
    pub fn into_parts(self) -> Vec<FormPart> {
        self.parts
    }
}

/// Request body; at most one kind can be set
#[derive(Debug, Clone, Default)]
pub enum RequestPayload {
    /// No body
    #[default]
    None,
    /// JSON body, sent with `Content-Type: application/json`
    Json(Value),
    /// Multipart body, the adapter supplies the content type and boundary
    Multipart(MultipartForm),
}

impl RequestPayload {
    /// Whether this payload is a multipart form
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart(_))
    }
}

/// Per-call options for [`crate::FacturapiClient`] verbs
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query parameters
    pub params: QueryParams,
    /// Body
    pub payload: RequestPayload,
}

impl RequestOptions {
    /// No parameters and no body
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set query parameters from any serializable map
    pub fn params<T: Serialize + ?Sized>(mut self, params: &T) -> ApiResult<Self> {
        self.params = QueryParams::from_serialize(params)?;
        Ok(self)
    }

    /// Set query parameters directly
    #[must_use]
    pub fn query(mut self, params: QueryParams) -> Self {
        self.params = params;
        self
    }

    /// Set a JSON body, replacing any multipart form
    pub fn body<T: Serialize + ?Sized>(mut self, body: &T) -> ApiResult<Self> {
        self.payload = match serde_json::to_value(body)? {
            Value::Null => RequestPayload::None,
            value => RequestPayload::Json(value),
        };
        Ok(self)
    }

    /// Set a multipart body, replacing any JSON body
    #[must_use]
    pub fn form(mut self, form: MultipartForm) -> Self {
        self.payload = RequestPayload::Multipart(form);
        self
    }
}

/// Everything the transport client needs to perform one call
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    /// Path relative to the base endpoint
    pub path: String,
    /// HTTP method
    pub method: Method,
    /// Query parameters
    pub params: QueryParams,
    /// Body
    pub payload: RequestPayload,
}

impl RequestDescriptor {
    /// Assemble a descriptor from a method, path and options
    pub fn new(method: Method, path: impl Into<String>, options: RequestOptions) -> Self {
        Self {
            path: path.into(),
            method,
            params: options.params,
            payload: options.payload,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_build_url_without_query() {
        let url = build_url("https://www.facturapi.io/v2", "/invoices", &QueryParams::new());
        assert_eq!(url, "https://www.facturapi.io/v2/invoices");
    }

    #[test]
    fn test_build_url_trims_and_joins() {
        let query = QueryParams::new().with("q", "pulgada");
        let url = build_url("http://localhost:8080/v2/", "catalogs/units", &query);
        assert_eq!(url, "http://localhost:8080/v2/catalogs/units?q=pulgada");
    }

    #[test]
    fn test_from_serialize_scalars_and_nulls() {
        let params = QueryParams::from_serialize(&json!({
            "page": 2,
            "q": "café & té",
            "livemode": false,
            "customer": null
        }))
        .unwrap();
        let pairs: HashMap<_, _> = params.pairs().iter().cloned().collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs["page"], "2");
        assert_eq!(pairs["livemode"], "false");
        assert_eq!(pairs["q"], "café & té");
    }

    #[test]
    fn test_from_serialize_nested_is_json() {
        let params = QueryParams::from_serialize(&json!({
            "date": { "gt": "2024-01-01" }
        }))
        .unwrap();
        assert_eq!(params.pairs()[0].1, r#"{"gt":"2024-01-01"}"#);
    }

    #[test]
    fn test_from_serialize_unit_and_none() {
        assert!(QueryParams::from_serialize(&()).unwrap().is_empty());
        assert!(QueryParams::from_serialize(&Option::<HashMap<String, String>>::None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_from_serialize_rejects_scalars() {
        let err = QueryParams::from_serialize(&42).unwrap_err();
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_encode_escapes() {
        let params = QueryParams::new().with("q", "a b&c=d");
        assert_eq!(params.encode(), "q=a+b%26c%3Dd");
    }

    #[test]
    fn test_body_replaces_form() {
        let options = RequestOptions::new()
            .form(MultipartForm::new().text("password", "x"))
            .body(&json!({"a": 1}))
            .unwrap();
        assert!(matches!(options.payload, RequestPayload::Json(_)));
    }

    #[test]
    fn test_null_body_is_no_body() {
        let options = RequestOptions::new().body(&Option::<Value>::None).unwrap();
        assert!(matches!(options.payload, RequestPayload::None));
    }

    proptest! {
        #[test]
        fn prop_query_roundtrip(map in proptest::collection::hash_map("[a-z_]{1,12}", "\\PC{0,16}", 0..8)) {
            let params = QueryParams::from_serialize(&map).unwrap();
            let url = build_url("https://www.facturapi.io/v2", "/customers", &params);
            let decoded: HashMap<String, String> = match url.split_once('?') {
                Some((_, query)) => form_urlencoded::parse(query.as_bytes()).into_owned().collect(),
                None => HashMap::new(),
            };
            prop_assert_eq!(decoded, map);
        }
    }
}
