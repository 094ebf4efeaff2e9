//! Endpoint-specific API implementations
//!
//! Each module provides a typed interface for one group of Facturapi
//! endpoints. All of them go through [`FacturapiClient`](crate::FacturapiClient).
//!
//! ## Mapping to the REST API
//!
//! | Module | Path prefix | Description |
//! |--------|-------------|-------------|
//! | `customers` | `/customers` | Customer CRUD and SAT tax-info validation |
//! | `products` | `/products` | Product catalog CRUD |
//! | `invoices` | `/invoices` | CFDI issuing, cancellation, drafts, downloads |
//! | `organizations` | `/organizations` | Issuer setup, certificates, API keys |
//! | `receipts` | `/receipts` | Sale receipts and global invoices |
//! | `retentions` | `/retentions` | Retention CFDI |
//! | `webhooks` | `/webhooks` | Webhook registration and event types |
//! | `catalogs` | `/catalogs` | SAT catalog search, Carta Porte 3.1 |
//! | `tools` | `/tools` | RFC validation |

pub mod catalogs;
pub mod common;
pub mod customers;
pub mod invoices;
pub mod organizations;
pub mod products;
pub mod receipts;
pub mod retentions;
pub mod tools;
pub mod webhooks;

pub use catalogs::{CatalogItem, CatalogQuery, CatalogsApi};
pub use common::{Address, EmailRecipients, GenericResponse, SearchResult, SendEmailBody};
pub use customers::{Customer, CustomersApi, TaxInfoValidation, TaxInfoValidationError};
pub use invoices::{CancelInvoiceOptions, Invoice, InvoicesApi, Stamp};
pub use organizations::{
    CertificateInfo, DomainAvailability, LegalInfo, Organization, OrganizationsApi, PendingStep,
    ReceiptSettings,
};
pub use products::{LocalTax, Product, ProductsApi, Tax};
pub use receipts::{Receipt, ReceiptsApi};
pub use retentions::{Retention, RetentionsApi};
pub use tools::ToolsApi;
pub use webhooks::{ApiEvent, ApiEventData, Webhook, WebhooksApi};
