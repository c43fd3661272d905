//! Client configuration

use std::fmt;
use std::time::Duration;

use url::Url;

use crate::{ClientError, Result};

/// An opaque credential value.
///
/// `Debug` and `Display` redact the contents so API keys cannot leak through
/// logs, error messages, or derived debug output on containing types.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The underlying value, for header construction only.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// Client configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// API endpoint URL, without a trailing slash
    pub endpoint: String,
    /// API key credential
    pub api_key: Secret,
    /// API secret credential
    pub api_secret: Secret,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Config {
    /// Create a new config for the given endpoint and credentials
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<Secret>,
        api_secret: impl Into<Secret>,
    ) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            timeout: Duration::from_secs(30),
            user_agent: format!("fluxsave-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// The base URL for API requests
    pub fn base_url(&self) -> &str {
        &self.endpoint
    }

    /// Validated once at client construction; the config is immutable after.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() || self.api_secret.is_empty() {
            return Err(ClientError::Config(
                "API key and secret are required".to_string(),
            ));
        }
        Url::parse(&self.endpoint)
            .map_err(|e| ClientError::Config(format!("invalid endpoint URL: {}", e)))?;
        if self.timeout.is_zero() {
            return Err(ClientError::Config(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config::new("https://api.fluxsave.test", "key-123", "secret-456")
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let config = Config::new("https://api.fluxsave.test/", "k", "s");
        assert_eq!(config.endpoint, "https://api.fluxsave.test");
    }

    #[test]
    fn test_empty_credentials_rejected() {
        let config = Config::new("https://api.fluxsave.test", "", "secret");
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));

        let config = Config::new("https://api.fluxsave.test", "key", "");
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let config = Config::new("not a url", "key", "secret");
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = valid_config().with_timeout(Duration::ZERO);
        assert!(matches!(config.validate(), Err(ClientError::Config(_))));
    }

    #[test]
    fn test_secrets_redacted_in_debug_output() {
        let config = valid_config();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("key-123"));
        assert!(!debug.contains("secret-456"));
        assert!(debug.contains("Secret(***)"));
    }

    #[test]
    fn test_secret_display_redacted() {
        assert_eq!(Secret::new("hunter2").to_string(), "***");
    }
}
