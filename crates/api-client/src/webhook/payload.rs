use crate::error::{ApiError, ApiResult};
use bytes::Bytes;
use serde_json::Value;

/// Received webhook body, in whatever shape the caller has it
#[derive(Debug, Clone, PartialEq)]
pub enum WebhookPayload {
    /// Raw body as text
    Text(String),
    /// Raw body as bytes, must be UTF-8
    Bytes(Vec<u8>),
    /// Body already parsed into a JSON object
    Event(Value),
}

impl WebhookPayload {
    /// The exact text the signature was computed over
    ///
    /// Text is used verbatim, bytes are UTF-8 decoded and an event object is
    /// serialized back to compact JSON in its original key order. Verifying a
    /// re-serialized event only succeeds if the sender emitted compact JSON,
    /// so prefer passing the raw body.
    pub fn canonicalize(&self) -> ApiResult<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Bytes(bytes) => String::from_utf8(bytes.clone())
                .map_err(|_| ApiError::PayloadShape("body is not valid UTF-8".to_string())),
            Self::Event(value @ Value::Object(_)) => Ok(serde_json::to_string(value)?),
            Self::Event(_) => Err(ApiError::PayloadShape(
                "event must be a JSON object".to_string(),
            )),
        }
    }
}

impl From<String> for WebhookPayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for WebhookPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<u8>> for WebhookPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<&[u8]> for WebhookPayload {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Bytes> for WebhookPayload {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes.to_vec())
    }
}

impl From<Value> for WebhookPayload {
    fn from(value: Value) -> Self {
        Self::Event(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_text_is_verbatim() {
        let raw = "{ \"type\" : \"invoice.status_updated\" }";
        assert_eq!(WebhookPayload::from(raw).canonicalize().unwrap(), raw);
    }

    #[test]
    fn test_bytes_are_decoded() {
        let payload = WebhookPayload::from(br#"{"type":"receipt.status_updated"}"#.as_slice());
        assert_eq!(
            payload.canonicalize().unwrap(),
            r#"{"type":"receipt.status_updated"}"#
        );
    }

    #[test]
    fn test_invalid_utf8_is_payload_shape() {
        let err = WebhookPayload::from(vec![0xff, 0xfe]).canonicalize().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PayloadShape);
    }

    #[test]
    fn test_event_is_serialized_compact() {
        let payload = WebhookPayload::from(json!({"type": "invoice.status_updated"}));
        assert_eq!(
            payload.canonicalize().unwrap(),
            r#"{"type":"invoice.status_updated"}"#
        );
    }

    #[test]
    fn test_event_keeps_key_order() {
        let raw = r#"{"id":"evt_1","type":"invoice.status_updated","data":{"type":"invoice","object":{"id":"inv_1","status":"valid"}}}"#;
        let value: Value = serde_json::from_str(raw).unwrap();
        assert_eq!(WebhookPayload::from(value).canonicalize().unwrap(), raw);
    }

    #[test]
    fn test_non_object_event_rejected() {
        for value in [json!(42), json!("text"), json!([1, 2]), Value::Null] {
            let err = WebhookPayload::from(value).canonicalize().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::PayloadShape);
            assert!(err.to_string().starts_with("invalid payload type"));
        }
    }
}
