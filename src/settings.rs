//! Loader for the JSON settings document (`config.json`).
//!
//! The settings document carries everything the client needs: the identity
//! of the confidential client (tenant, client id, client secret, scope),
//! the API base endpoints, the subscription key, and a couple of default
//! identifiers used by the demo binary.
//!
//! Every key is optional at parse time. Keys are surfaced through accessors
//! that return [`Error::MissingSetting`] when absent, so an operation that
//! never references a key is never affected by its absence.
//!
//! # Example
//!
//! ```no_run
//! use iothub_rs::Settings;
//!
//! # fn example() -> iothub_rs::Result<()> {
//! let settings = Settings::load("config.json")?;
//! println!("tenant: {}", settings.tenant()?);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;

use crate::{Error, Result};

/// Settings path used when the process is given no argument.
pub const DEFAULT_SETTINGS_PATH: &str = "config.json";

/// The parsed settings document.
///
/// Field spellings follow the settings document exactly (a mix of snake
/// and camel case, inherited from the service's published sample config).
/// Secret material is wrapped in [`SecretString`] and never appears in
/// `Debug` output.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    tenant: Option<String>,
    client_id: Option<String>,
    client_secret: Option<SecretString>,
    scope: Option<Vec<String>>,
    #[serde(rename = "assetApiEndpoint")]
    asset_api_endpoint: Option<String>,
    #[serde(rename = "timeSeriesApiEndpoint")]
    time_series_api_endpoint: Option<String>,
    #[serde(rename = "apiSubscriptionKey")]
    api_subscription_key: Option<SecretString>,
    #[serde(rename = "workSpaceId")]
    work_space_id: Option<String>,
    #[serde(rename = "assetId")]
    asset_id: Option<String>,
    #[serde(rename = "signalIds")]
    signal_ids: Option<Vec<String>>,
    authority: Option<String>,
}

impl Settings {
    /// Load the settings document from `path`.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigNotFound`] if `path` does not exist.
    /// - [`Error::ConfigParse`] if the document is not valid JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let raw = std::fs::read_to_string(path).map_err(|_| Error::ConfigNotFound {
            path: path.to_path_buf(),
        })?;
        serde_json::from_str(&raw).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Directory tenant id or domain.
    pub fn tenant(&self) -> Result<&str> {
        self.tenant.as_deref().ok_or(Error::MissingSetting("tenant"))
    }

    /// Application (client) id of the confidential client.
    pub fn client_id(&self) -> Result<&str> {
        self.client_id
            .as_deref()
            .ok_or(Error::MissingSetting("client_id"))
    }

    /// Client secret of the confidential client.
    pub fn client_secret(&self) -> Result<&SecretString> {
        self.client_secret
            .as_ref()
            .ok_or(Error::MissingSetting("client_secret"))
    }

    /// OAuth2 scopes to request.
    pub fn scope(&self) -> Result<&[String]> {
        self.scope
            .as_deref()
            .ok_or(Error::MissingSetting("scope"))
    }

    /// Base URL of the Asset API, trailing slash included.
    pub fn asset_api_endpoint(&self) -> Result<&str> {
        self.asset_api_endpoint
            .as_deref()
            .ok_or(Error::MissingSetting("assetApiEndpoint"))
    }

    /// Base URL of the Time Series API, trailing slash included.
    pub fn time_series_api_endpoint(&self) -> Result<&str> {
        self.time_series_api_endpoint
            .as_deref()
            .ok_or(Error::MissingSetting("timeSeriesApiEndpoint"))
    }

    /// API-gateway subscription key, sent alongside the bearer token.
    pub fn api_subscription_key(&self) -> Result<&SecretString> {
        self.api_subscription_key
            .as_ref()
            .ok_or(Error::MissingSetting("apiSubscriptionKey"))
    }

    /// Default workspace id used by the demo binary.
    pub fn work_space_id(&self) -> Result<&str> {
        self.work_space_id
            .as_deref()
            .ok_or(Error::MissingSetting("workSpaceId"))
    }

    /// Default asset id used by the demo binary.
    pub fn asset_id(&self) -> Result<&str> {
        self.asset_id
            .as_deref()
            .ok_or(Error::MissingSetting("assetId"))
    }

    /// Default data-channel ids used by the demo binary.
    pub fn signal_ids(&self) -> Result<&[String]> {
        self.signal_ids
            .as_deref()
            .ok_or(Error::MissingSetting("signalIds"))
    }

    /// Identity-provider base URL, if the document overrides the default.
    ///
    /// When absent, [`ConfidentialClient`](crate::auth::ConfidentialClient)
    /// uses the public cloud authority.
    pub fn authority(&self) -> Option<&str> {
        self.authority.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use secrecy::ExposeSecret;

    use super::*;

    fn write_settings(json: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{json}").unwrap();
        file
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/no/such/config.json").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_load_unparseable_file() {
        let file = write_settings("{ tenant: not json");
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_load_full_document() {
        let file = write_settings(
            r#"{
                "tenant": "t1",
                "client_id": "c1",
                "client_secret": "s1",
                "scope": ["api://iothub/.default"],
                "assetApiEndpoint": "https://api.example.com/veracity/ioap/api/v1/",
                "timeSeriesApiEndpoint": "https://api.example.com/veracity/timeseries/api/v1/",
                "apiSubscriptionKey": "k1",
                "workSpaceId": "w1",
                "assetId": "4000c0e0-0b16-4c78-ae07-a39749c052e2",
                "signalIds": ["IL1", "IL2"]
            }"#,
        );
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.tenant().unwrap(), "t1");
        assert_eq!(settings.scope().unwrap(), ["api://iothub/.default"]);
        assert_eq!(settings.work_space_id().unwrap(), "w1");
        assert_eq!(settings.signal_ids().unwrap(), ["IL1", "IL2"]);
        assert_eq!(settings.client_secret().unwrap().expose_secret(), "s1");
        assert_eq!(settings.authority(), None);
    }

    #[test]
    fn test_missing_key_fails_at_first_use() {
        let file = write_settings(r#"{ "tenant": "t1" }"#);
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.tenant().unwrap(), "t1");
        match settings.asset_api_endpoint().unwrap_err() {
            Error::MissingSetting(key) => assert_eq!(key, "assetApiEndpoint"),
            other => panic!("expected MissingSetting, got {other:?}"),
        }
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let file = write_settings(r#"{ "client_secret": "super-secret", "apiSubscriptionKey": "key-material" }"#);
        let settings = Settings::load(file.path()).unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("super-secret"));
        assert!(!debug.contains("key-material"));
    }
}
