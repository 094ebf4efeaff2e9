//! End-to-end request pipeline tests against a mock Facturapi server

use facturapi_client::endpoints::{CancelInvoiceOptions, SendEmailBody};
use facturapi_client::enums::{CancellationMotive, InvoiceStatus};
use facturapi_client::{ApiResponse, ClientConfig, ErrorKind, FacturapiClient, RequestOptions};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{
    body_json, body_string_contains, header, header_exists, header_regex, method, path, query_param,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "sk_test_abc";

fn client_for(server: &MockServer) -> FacturapiClient {
    let mut client = FacturapiClient::new(API_KEY).unwrap();
    client.set_base_url(server.uri());
    client
}

fn customer_json(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "livemode": false,
        "tax_id": "XAXX010101000",
        "legal_name": "PUBLICO EN GENERAL",
        "tax_system": "616"
    })
}

fn invoice_json(status: &str) -> serde_json::Value {
    json!({ "id": "inv_1", "status": status, "total": 116.0 })
}

#[tokio::test]
async fn test_sends_basic_auth_and_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/cus_1"))
        .and(header("authorization", "Basic c2tfdGVzdF9hYmM6"))
        .and(header("content-type", "application/json"))
        .and(header_exists("x-request-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json("cus_1")))
        .expect(1)
        .mount(&server)
        .await;

    let customer = client_for(&server).customers().retrieve("cus_1").await.unwrap();
    assert_eq!(customer.id, "cus_1");
    assert_eq!(customer.legal_name, "PUBLICO EN GENERAL");
}

#[tokio::test]
async fn test_query_params_rendering() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers"))
        .and(query_param("q", "acme corp"))
        .and(query_param("page", "2"))
        .and(query_param("date", r#"{"gt":"2024-01-01"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 2,
            "total_pages": 2,
            "total_results": 1,
            "data": [customer_json("cus_2")]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = json!({
        "q": "acme corp",
        "page": 2,
        "limit": null,
        "date": { "gt": "2024-01-01" }
    });
    let result = client_for(&server).customers().list(&params).await.unwrap();
    assert_eq!(result.page, 2);
    assert_eq!(result.data[0].id, "cus_2");
}

#[tokio::test]
async fn test_json_body_is_sent() {
    let server = MockServer::start().await;
    let body = json!({ "legal_name": "ACME", "tax_id": "AAA010101AAA" });
    Mock::given(method("POST"))
        .and(path("/customers"))
        .and(body_json(&body))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json("cus_3")))
        .expect(1)
        .mount(&server)
        .await;

    let customer = client_for(&server).customers().create(&body).await.unwrap();
    assert_eq!(customer.id, "cus_3");
}

#[tokio::test]
async fn test_cancel_invoice_sends_motive_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/invoices/inv_1"))
        .and(query_param("motive", "01"))
        .and(query_param("substitution", "a1b2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(invoice_json("canceled")))
        .expect(1)
        .mount(&server)
        .await;

    let options =
        CancelInvoiceOptions::new(CancellationMotive::ErroresConRelacion).with_substitution("a1b2");
    let invoice = client_for(&server)
        .invoices()
        .cancel("inv_1", &options)
        .await
        .unwrap();
    assert_eq!(invoice.status, InvoiceStatus::Canceled);
}

#[tokio::test]
async fn test_pdf_is_streamed_even_if_json_like() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices/inv_1/pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(b"{\"a\":1}".to_vec(), "application/pdf"))
        .mount(&server)
        .await;

    let body = client_for(&server).invoices().download_pdf("inv_1").await.unwrap();
    assert!(body.is_stream());
    assert_eq!(body.content_type(), Some("application/pdf"));
    assert_eq!(&body.into_bytes().await.unwrap()[..], b"{\"a\":1}");
}

#[tokio::test]
async fn test_zip_written_to_file() {
    let server = MockServer::start().await;
    let archive = vec![0x50, 0x4b, 0x03, 0x04, 0x00, 0x01];
    Mock::given(method("GET"))
        .and(path("/retentions/ret_1/zip"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(archive.clone(), "application/zip"))
        .mount(&server)
        .await;

    let body = client_for(&server).retentions().download_zip("ret_1").await.unwrap();
    let mut out = Vec::new();
    let written = body.write_to(&mut out).await.unwrap();
    assert_eq!(written, archive.len() as u64);
    assert_eq!(out, archive);
}

#[tokio::test]
async fn test_plain_text_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations/org_1/apikeys/test"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("sk_test_new", "text/plain"))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .get("/organizations/org_1/apikeys/test", RequestOptions::new())
        .await
        .unwrap();
    assert!(matches!(&response, ApiResponse::Text(text) if text == "sk_test_new"));
}

#[tokio::test]
async fn test_non_utf8_text_response_is_returned() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(vec![0x43, 0x61, 0x66, 0xe9], "text/plain; charset=iso-8859-1"),
        )
        .mount(&server)
        .await;

    let response = client_for(&server)
        .get("/x", RequestOptions::new())
        .await
        .unwrap();
    assert!(matches!(&response, ApiResponse::Text(text) if text == "Caf\u{fffd}"));
}

#[tokio::test]
async fn test_api_error_uses_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "El campo customer es requerido",
            "path": "customer"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .invoices()
        .create(&json!({}), &())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(400));
    assert!(err.is_client_error());
    assert_eq!(err.to_string(), "El campo customer es requerido");
}

#[tokio::test]
async fn test_api_error_falls_back_to_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/products/prod_x"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>nope</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).products().retrieve("prod_x").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "Not Found");
}

#[tokio::test]
async fn test_server_error_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/receipts/rec_1"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client_for(&server).receipts().retrieve("rec_1").await.unwrap_err();
    assert!(err.is_server_error());
    assert_eq!(err.to_string(), "Service Unavailable");
}

#[tokio::test]
async fn test_empty_id_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.invoices().retrieve("").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.to_string(), "id is required");

    let err = client
        .receipts()
        .send_by_email("  ", &SendEmailBody::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_multipart_upload_has_no_json_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/organizations/org_1/certificate"))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(body_string_contains("name=\"cer\"; filename=\"cer.cer\""))
        .and(body_string_contains("name=\"key\"; filename=\"key.key\""))
        .and(body_string_contains("name=\"password\""))
        .and(body_string_contains("12345678a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "org_1",
            "certificate": { "has_certificate": true }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let org = client_for(&server)
        .organizations()
        .upload_certificate("org_1", b"CER".to_vec(), b"KEY".to_vec(), "12345678a")
        .await
        .unwrap();
    assert!(org.certificate.unwrap().has_certificate);
}

#[tokio::test]
async fn test_tax_id_validation_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/tools/tax_id_validation"))
        .and(query_param("tax_id", "AAA010101AAA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "efos": { "is_valid": true } })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .tools()
        .validate_tax_id("AAA010101AAA")
        .await
        .unwrap();
    assert_eq!(result["efos"]["is_valid"], json!(true));
}

#[tokio::test]
async fn test_carta_porte_catalog_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalogs/cartaporte/3.1/hazardous-materials"))
        .and(query_param("q", "gas"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "total_pages": 1,
            "total_results": 1,
            "data": [{ "key": "1971", "description": "Gas natural comprimido" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .catalogs()
        .search_hazardous_materials(&json!({ "q": "gas" }))
        .await
        .unwrap();
    assert_eq!(result.data[0].key, "1971");
}

#[tokio::test]
async fn test_base_url_from_config() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/customers/cus_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_json("cus_1")))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(API_KEY).with_base_url(format!("{}/v2/", server.uri()));
    let client = FacturapiClient::with_config(config).unwrap();
    client.customers().delete("cus_1").await.unwrap();
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/webhooks/wh_1"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let config = ClientConfig::new(API_KEY)
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(200));
    let client = FacturapiClient::with_config(config).unwrap();
    let err = client.webhooks().retrieve("wh_1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
