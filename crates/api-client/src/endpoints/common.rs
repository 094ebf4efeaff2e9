//! Shapes shared by several endpoint groups

use serde::{Deserialize, Serialize};

/// Paginated search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult<T> {
    /// Current page, starting at 1
    #[serde(default)]
    pub page: u32,
    /// Total number of pages
    #[serde(default)]
    pub total_pages: u32,
    /// Total number of matching objects
    #[serde(default)]
    pub total_results: u64,
    /// Objects on this page
    pub data: Vec<T>,
}

/// `{ "ok": true }` style acknowledgement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenericResponse {
    /// Whether the operation succeeded
    pub ok: bool,
}

/// Optional recipients for the `.../email` endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SendEmailBody {
    /// One address or several; defaults to the customer's email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<EmailRecipients>,
}

/// Single address or list of addresses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmailRecipients {
    /// One address
    One(String),
    /// Several addresses
    Many(Vec<String>),
}

impl SendEmailBody {
    /// Send to a single address
    pub fn to(email: impl Into<String>) -> Self {
        Self {
            email: Some(EmailRecipients::One(email.into())),
        }
    }

    /// Send to several addresses
    pub fn to_many<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            email: Some(EmailRecipients::Many(emails.into_iter().map(Into::into).collect())),
        }
    }
}

/// Fiscal address
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub exterior: Option<String>,
    pub interior: Option<String>,
    #[serde(default)]
    pub neighborhood: Option<String>,
    pub zip: String,
    pub city: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}
