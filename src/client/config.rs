//! Client configuration options.

use std::time::Duration;

use secrecy::SecretString;

use crate::settings::Settings;
use crate::{Error, Result};

/// Header carrying the API-gateway subscription key on every call.
pub const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";

/// Configuration for the IoT Hub client.
///
/// # Example
///
/// ```
/// use iothub_rs::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::default()
///     .with_timeout(Duration::from_secs(60))
///     .with_user_agent("my-app/1.0");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("iothub-rs/{} (Rust)", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// The API base endpoints and subscription key a client calls with.
///
/// Every part is optional: an operation that needs a part that is absent
/// fails with [`Error::MissingSetting`] at call time, and operations that
/// never touch it are unaffected.
#[derive(Debug, Clone, Default)]
pub struct ApiEndpoints {
    asset_api: Option<String>,
    time_series_api: Option<String>,
    subscription_key: Option<SecretString>,
}

impl ApiEndpoints {
    /// Create an empty endpoint set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy whatever endpoint settings are present in the document.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            asset_api: settings.asset_api_endpoint().ok().map(str::to_string),
            time_series_api: settings
                .time_series_api_endpoint()
                .ok()
                .map(str::to_string),
            subscription_key: settings.api_subscription_key().ok().cloned(),
        }
    }

    /// Set the Asset API base URL (trailing slash included).
    pub fn with_asset_api(mut self, base: impl Into<String>) -> Self {
        self.asset_api = Some(base.into());
        self
    }

    /// Set the Time Series API base URL (trailing slash included).
    pub fn with_time_series_api(mut self, base: impl Into<String>) -> Self {
        self.time_series_api = Some(base.into());
        self
    }

    /// Set the subscription key sent alongside the bearer token.
    pub fn with_subscription_key(mut self, key: SecretString) -> Self {
        self.subscription_key = Some(key);
        self
    }

    pub(crate) fn asset_api(&self) -> Result<&str> {
        self.asset_api
            .as_deref()
            .ok_or(Error::MissingSetting("assetApiEndpoint"))
    }

    pub(crate) fn time_series_api(&self) -> Result<&str> {
        self.time_series_api
            .as_deref()
            .ok_or(Error::MissingSetting("timeSeriesApiEndpoint"))
    }

    pub(crate) fn subscription_key(&self) -> Result<&SecretString> {
        self.subscription_key
            .as_ref()
            .ok_or(Error::MissingSetting("apiSubscriptionKey"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("iothub-rs/"));
    }

    #[test]
    fn test_config_builders() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(5))
            .with_user_agent("demo/0.1");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.user_agent, "demo/0.1");
    }

    #[test]
    fn test_empty_endpoints_fail_on_resolution() {
        let endpoints = ApiEndpoints::new();
        assert!(matches!(
            endpoints.asset_api(),
            Err(Error::MissingSetting("assetApiEndpoint"))
        ));
        assert!(matches!(
            endpoints.time_series_api(),
            Err(Error::MissingSetting("timeSeriesApiEndpoint"))
        ));
        assert!(matches!(
            endpoints.subscription_key(),
            Err(Error::MissingSetting("apiSubscriptionKey"))
        ));
    }

    #[test]
    fn test_endpoint_builders() {
        let endpoints = ApiEndpoints::new()
            .with_asset_api("https://a/")
            .with_time_series_api("https://t/")
            .with_subscription_key(SecretString::from("k1"));
        assert_eq!(endpoints.asset_api().unwrap(), "https://a/");
        assert_eq!(endpoints.time_series_api().unwrap(), "https://t/");
        assert!(endpoints.subscription_key().is_ok());
    }
}
