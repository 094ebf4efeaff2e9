//! Rust client for the Facturapi electronic invoicing API
//!
//! This crate wraps the Facturapi REST API behind typed endpoint groups and a
//! single request pipeline that adapts to the runtime it is compiled for.
//!
//! # Features
//!
//! - **Basic-auth on every request**: `Basic base64(api_key + ":")`
//! - **Content-type aware responses**: JSON is parsed, PDF/XML/ZIP come back as
//!   a byte stream on native targets and as a buffered blob on `wasm32`
//! - **Pluggable transport**: implement [`HttpTransport`] to swap the HTTP stack
//! - **Webhook verification**: HMAC-SHA256 with constant-time comparison, or
//!   delegated to the API when no local primitive is available
//! - **Request correlation**: every call carries a unique `X-Request-ID`
//!
//! # Example
//!
//! ```rust,no_run
//! use facturapi_client::{FacturapiClient, enums::CancellationMotive};
//! use facturapi_client::endpoints::CancelInvoiceOptions;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FacturapiClient::new("sk_test_...")?;
//!
//!     let customers = client.customers().list(&()).await?;
//!     println!("{} customers", customers.total_results);
//!
//!     let options = CancelInvoiceOptions::new(CancellationMotive::NoSeConcreto);
//!     let invoice = client.invoices().cancel("inv_123", &options).await?;
//!     println!("status: {}", invoice.status);
//!
//!     let mut file = tokio::fs::File::create("invoice.pdf").await?;
//!     client.invoices().download_pdf("inv_123").await?.write_to(&mut file).await?;
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod endpoints;
pub mod enums;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;
pub mod webhook;

pub use client::{basic_auth_value, FacturapiClient};
pub use config::{ApiVersion, ClientConfig};
pub use error::{ApiError, ApiResult, ErrorKind};
pub use request::{MultipartForm, QueryParams, RequestOptions};
pub use response::{ApiResponse, BinaryBody, ContentKind};
pub use transport::{HttpTransport, ReqwestTransport, Runtime};
pub use webhook::{WebhookPayload, WebhookVerifier};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::FacturapiClient;
    pub use crate::config::{ApiVersion, ClientConfig};
    pub use crate::endpoints::{
        ApiEvent, CatalogsApi, CustomersApi, InvoicesApi, OrganizationsApi, ProductsApi,
        ReceiptsApi, RetentionsApi, SearchResult, ToolsApi, WebhooksApi,
    };
    pub use crate::error::{ApiError, ApiResult, ErrorKind};
    pub use crate::response::{ApiResponse, BinaryBody};
    pub use crate::webhook::{WebhookPayload, WebhookVerifier};
}
