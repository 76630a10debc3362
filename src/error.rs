//! Error types for the IoT Hub API client.
//!
//! This module provides a single error type covering all failure modes of
//! the crate: settings-document problems, token acquisition failures, and
//! the two distinct ways an API call can fail (bad status vs. undecodable
//! body).

use std::path::PathBuf;

use thiserror::Error;

/// A specialized `Result` type for IoT Hub operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all IoT Hub API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The settings document does not exist at the given path.
    #[error("could not find configuration file '{}'", path.display())]
    ConfigNotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// The settings document exists but is not valid JSON.
    #[error("configuration file '{}' is not valid JSON: {source}", path.display())]
    ConfigParse {
        /// Path of the offending document
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// A settings key referenced by an operation is absent.
    #[error("missing configuration setting '{0}'")]
    MissingSetting(&'static str),

    /// The identity provider rejected the client-credentials grant.
    ///
    /// Carries the three diagnostic fields the provider returns for
    /// support purposes.
    #[error("authentication failed: {error}: {error_description} (correlation id {correlation_id})")]
    Auth {
        /// Provider error code (e.g. `invalid_client`)
        error: String,
        /// Human-readable description of the failure
        error_description: String,
        /// Correlation identifier for support diagnostics
        correlation_id: String,
    },

    /// No unexpired bearer token is available.
    ///
    /// Operations never acquire tokens themselves; call
    /// [`IotHubClient::authenticate`](crate::IotHubClient::authenticate)
    /// first.
    #[error("no valid bearer token; authenticate first")]
    TokenExpired,

    /// The API answered with a non-success status code.
    ///
    /// The body is not assumed to be parseable and is not decoded.
    #[error("call returned with status code {status}")]
    Status {
        /// HTTP status code (>= 300)
        status: u16,
    },

    /// The API answered with a success status but the body was not JSON.
    #[error("JSON decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// The HTTP request itself failed (connect, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid input provided to a builder or constructor.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Returns `true` if this error came from the settings document
    /// (missing file, unparseable file, or an absent key).
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::ConfigNotFound { .. } | Error::ConfigParse { .. } | Error::MissingSetting(_)
        )
    }

    /// Returns `true` if this is an authentication-related error.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Auth { .. } | Error::TokenExpired)
    }

    /// The HTTP status code, if this error is a status failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_predicates() {
        assert!(Error::MissingSetting("tenant").is_config_error());
        assert!(Error::ConfigNotFound {
            path: "config.json".into()
        }
        .is_config_error());
        assert!(!Error::TokenExpired.is_config_error());
    }

    #[test]
    fn test_auth_predicates() {
        let err = Error::Auth {
            error: "invalid_client".into(),
            error_description: "AADSTS7000215".into(),
            correlation_id: "d1a7f1f8".into(),
        };
        assert!(err.is_auth_error());
        assert!(Error::TokenExpired.is_auth_error());
        assert!(!Error::Status { status: 404 }.is_auth_error());
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(Error::Status { status: 503 }.status(), Some(503));
        assert_eq!(Error::TokenExpired.status(), None);
    }

    #[test]
    fn test_decode_distinct_from_status() {
        let decode = Error::Decode(serde_json::from_str::<serde_json::Value>("{").unwrap_err());
        assert_eq!(decode.status(), None);
        assert!(!decode.is_auth_error());
    }
}
