//! Configuration for the Facturapi API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Base URL of API version 2
pub const BASE_URL_V2: &str = "https://www.facturapi.io/v2";

/// Base URL of API version 1
pub const BASE_URL_V1: &str = "https://www.facturapi.io/v1";

/// Default user agent sent with every request
const DEFAULT_USER_AGENT: &str = concat!("facturapi-rs/", env!("CARGO_PKG_VERSION"));

/// Supported API versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiVersion {
    /// Legacy v1 API
    V1,
    /// Current v2 API
    #[default]
    V2,
}

impl ApiVersion {
    /// All versions accepted by the client
    pub const ALL: [ApiVersion; 2] = [ApiVersion::V1, ApiVersion::V2];

    /// Version tag as used in URLs
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "v1",
            Self::V2 => "v2",
        }
    }

    /// Default base endpoint for this version
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Self::V1 => BASE_URL_V1,
            Self::V2 => BASE_URL_V2,
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v1" => Ok(Self::V1),
            "v2" => Ok(Self::V2),
            _ => Err(ApiError::config(format!(
                "Invalid API version. Valid values are: {}",
                Self::ALL.map(Self::as_str).join(", ")
            ))),
        }
    }
}

/// Client configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Test or live secret key
    #[serde(skip_serializing)]
    pub api_key: String,
    /// API version, selects the default base URL
    #[serde(default)]
    pub api_version: ApiVersion,
    /// Base URL override (e.g. a mock server in tests)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout; `None` waits indefinitely
    #[serde(default, with = "humantime_serde")]
    pub timeout: Option<Duration>,
    /// User agent header value
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

// Keeps the key out of logs and panic messages.
impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ClientConfig {
    /// Create configuration for an API key with default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_version: ApiVersion::default(),
            base_url: None,
            timeout: None,
            user_agent: default_user_agent(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `FACTURAPI_KEY`: API key (required)
    /// - `FACTURAPI_API_VERSION`: `v1` or `v2`
    /// - `FACTURAPI_BASE_URL`: Base URL override
    /// - `FACTURAPI_TIMEOUT_SECS`: Request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let api_key = env::var("FACTURAPI_KEY").map_err(|_| ApiError::missing_env("FACTURAPI_KEY"))?;

        let api_version = match env::var("FACTURAPI_API_VERSION") {
            Ok(v) if !v.is_empty() => v.parse()?,
            _ => ApiVersion::default(),
        };

        let base_url = env::var("FACTURAPI_BASE_URL").ok().filter(|u| !u.is_empty());

        let timeout = env::var("FACTURAPI_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs);

        Ok(Self {
            api_key,
            api_version,
            base_url,
            timeout,
            user_agent: default_user_agent(),
        })
    }

    /// Base URL the client starts with
    #[must_use]
    pub fn resolved_base_url(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| self.api_version.base_url().to_string())
    }

    /// Builder-style method to set API version
    #[must_use]
    pub fn with_api_version(mut self, version: ApiVersion) -> Self {
        self.api_version = version;
        self
    }

    /// Builder-style method to override the base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builder-style method to set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(ApiError::config("api_key cannot be empty"));
        }

        let base_url = self.resolved_base_url();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_version_is_v2() {
        let config = ClientConfig::new("sk_test_123");
        assert_eq!(config.api_version, ApiVersion::V2);
        assert_eq!(config.resolved_base_url(), "https://www.facturapi.io/v2");
    }

    #[test]
    fn test_v1_base_url() {
        let config = ClientConfig::new("sk_test_123").with_api_version(ApiVersion::V1);
        assert_eq!(config.resolved_base_url(), "https://www.facturapi.io/v1");
    }

    #[test]
    fn test_override_wins_over_version() {
        let config = ClientConfig::new("sk_test_123")
            .with_api_version(ApiVersion::V1)
            .with_base_url("http://127.0.0.1:9000/v2");
        assert_eq!(config.resolved_base_url(), "http://127.0.0.1:9000/v2");
    }

    #[test]
    fn test_parse_version() {
        assert_eq!("v1".parse::<ApiVersion>().unwrap(), ApiVersion::V1);
        assert_eq!("V2".parse::<ApiVersion>().unwrap(), ApiVersion::V2);
        let err = "v3".parse::<ApiVersion>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration error: Invalid API version. Valid values are: v1, v2"
        );
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::new("sk_test_123").validate().is_ok());
        assert!(ClientConfig::new("  ").validate().is_err());
        assert!(ClientConfig::new("sk_test_123")
            .with_base_url("ftp://example.com")
            .validate()
            .is_err());
        assert!(ClientConfig::new("sk_test_123")
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", ClientConfig::new("sk_live_secret"));
        assert!(!rendered.contains("sk_live_secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
