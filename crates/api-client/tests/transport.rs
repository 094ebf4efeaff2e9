//! Custom transport adapters and runtime-dependent binary handling

use async_trait::async_trait;
use facturapi_client::transport::{TransportRequest, TransportResponse};
use facturapi_client::{
    ApiResult, BinaryBody, ClientConfig, FacturapiClient, HttpTransport, Runtime,
};
use reqwest::StatusCode;
use std::sync::{Arc, Mutex};

/// Replays one canned response and records what it was sent
struct CannedTransport {
    runtime: Runtime,
    content_type: &'static str,
    body: &'static [u8],
    seen: Mutex<Vec<TransportRequest>>,
}

impl CannedTransport {
    fn new(runtime: Runtime, content_type: &'static str, body: &'static [u8]) -> Arc<Self> {
        Arc::new(Self {
            runtime,
            content_type,
            body,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl HttpTransport for CannedTransport {
    async fn send(&self, request: TransportRequest) -> ApiResult<TransportResponse> {
        self.seen.lock().unwrap().push(request);
        Ok(TransportResponse::buffered(
            StatusCode::OK,
            Some(self.content_type),
            self.body,
        ))
    }

    fn runtime(&self) -> Runtime {
        self.runtime
    }
}

#[tokio::test]
async fn test_browser_runtime_buffers_binary() {
    let transport = CannedTransport::new(Runtime::Browser, "application/pdf", b"%PDF-1.7");
    let client =
        FacturapiClient::with_transport(ClientConfig::new("sk_test_abc"), transport.clone()).unwrap();

    let body = client.receipts().download_pdf("rec_1").await.unwrap();
    assert!(matches!(body, BinaryBody::Blob { .. }));
    assert_eq!(&body.into_bytes().await.unwrap()[..], b"%PDF-1.7");

    let seen = transport.seen.lock().unwrap();
    assert_eq!(seen[0].url, "https://www.facturapi.io/v2/receipts/rec_1/pdf");
}

#[tokio::test]
async fn test_bridge_runtime_buffers_binary() {
    let transport = CannedTransport::new(Runtime::Bridge, "application/xml", b"<cfdi/>");
    let client = FacturapiClient::with_transport(ClientConfig::new("sk_test_abc"), transport).unwrap();
    assert_eq!(client.runtime(), Runtime::Bridge);

    let body = client.invoices().download_xml("inv_1").await.unwrap();
    assert!(!body.is_stream());
}

#[tokio::test]
async fn test_server_runtime_streams_binary() {
    let transport = CannedTransport::new(Runtime::Server, "image/png", b"\x89PNG");
    let client = FacturapiClient::with_transport(ClientConfig::new("sk_test_abc"), transport).unwrap();

    let body = client.invoices().download_pdf("inv_1").await.unwrap();
    assert!(body.is_stream());
}

#[tokio::test]
async fn test_adapter_receives_auth_and_json_body() {
    let transport = CannedTransport::new(Runtime::Server, "application/json", br#"{"ok":true}"#);
    let client =
        FacturapiClient::with_transport(ClientConfig::new("sk_test_abc"), transport.clone()).unwrap();

    client
        .invoices()
        .send_by_email("inv_1", &Default::default())
        .await
        .unwrap();

    let seen = transport.seen.lock().unwrap();
    let request = &seen[0];
    assert_eq!(request.method, reqwest::Method::POST);
    assert_eq!(request.headers["authorization"], "Basic c2tfdGVzdF9hYmM6");
    assert_eq!(request.headers["content-type"], "application/json");
    assert!(matches!(
        &request.body,
        Some(facturapi_client::transport::TransportBody::Json(text)) if text == "{}"
    ));
}
