//! Webhook verification through the local and remote backends

use facturapi_client::enums::ApiEventType;
use facturapi_client::webhook::{RemoteValidation, SIGNATURE_HEADER};
use facturapi_client::{ErrorKind, FacturapiClient, WebhookVerifier};
use facturapi_crypto::hmac_sha256_hex;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SECRET: &str = "whsec_test";
const PAYLOAD: &str = r#"{"id":"evt_1","type":"receipt.self_invoice_complete","data":{"type":"receipt","object":{"id":"rec_1"}}}"#;

fn client_for(server: &MockServer) -> FacturapiClient {
    let mut client = FacturapiClient::new("sk_test_abc").unwrap();
    client.set_base_url(server.uri());
    client
}

#[test]
fn test_signature_header_name() {
    assert_eq!(SIGNATURE_HEADER, "Facturapi-Signature");
}

#[tokio::test]
async fn test_validate_signature_via_webhooks_api() {
    let client = FacturapiClient::new("sk_test_abc").unwrap();
    let signature = hmac_sha256_hex(SECRET.as_bytes(), PAYLOAD.as_bytes());

    let event = client
        .webhooks()
        .validate_signature(SECRET, &signature, PAYLOAD.as_bytes())
        .await
        .unwrap();
    assert_eq!(event.kind(), Some(ApiEventType::ReceiptSelfInvoiceComplete));
    assert_eq!(event.data.unwrap().object["id"], "rec_1");
}

#[tokio::test]
async fn test_wrong_secret_rejected() {
    let client = FacturapiClient::new("sk_test_abc").unwrap();
    let signature = hmac_sha256_hex(b"whsec_other", PAYLOAD.as_bytes());

    let err = client
        .webhooks()
        .validate_signature(SECRET, &signature, PAYLOAD)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Signature);
}

#[tokio::test]
async fn test_remote_validation_accepts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhooks/validate-signature"))
        .and(body_json(json!({
            "secret": SECRET,
            "signature": "abc123",
            "payload": PAYLOAD
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "valid": true })))
        .expect(1)
        .mount(&server)
        .await;

    let verifier = WebhookVerifier::new(RemoteValidation::new(client_for(&server)));
    let event = verifier.verify(SECRET, "abc123", PAYLOAD).await.unwrap();
    assert_eq!(event.id.as_deref(), Some("evt_1"));
}

#[tokio::test]
async fn test_remote_validation_rejects() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhooks/validate-signature"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "valid": false })))
        .mount(&server)
        .await;

    let verifier = WebhookVerifier::new(RemoteValidation::new(client_for(&server)));
    let err = verifier.verify(SECRET, "abc123", PAYLOAD).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Signature);
}

#[tokio::test]
async fn test_remote_api_error_is_signature_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhooks/validate-signature"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "bad signature" })))
        .mount(&server)
        .await;

    let verifier = WebhookVerifier::new(RemoteValidation::new(client_for(&server)));
    let err = verifier.verify(SECRET, "abc123", PAYLOAD).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Signature);
    assert_eq!(err.to_string(), "invalid signature");
}
