//! Client-credentials token acquisition with an in-process cache.

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::{Error, Result};

/// Identity-provider base URL used when the settings document does not
/// override it.
pub const DEFAULT_AUTHORITY: &str = "https://login.microsoftonline.com";

/// A token expiring within this margin is treated as already expired, so
/// callers never get a bearer that dies mid-request.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Lifetime assumed when the provider omits `expires_in`.
const DEFAULT_LIFETIME_SECS: i64 = 3599;

/// A bearer token plus its expiry.
///
/// Held only in process memory; lost on exit.
#[derive(Clone)]
pub struct Token {
    bearer: SecretString,
    expires_at: DateTime<Utc>,
}

impl Token {
    /// The opaque bearer string.
    pub fn bearer(&self) -> &SecretString {
        &self.bearer
    }

    /// When the token stops being accepted.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the token is expired (or expires within the safety margin).
    pub fn is_expired(&self) -> bool {
        Utc::now() + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("bearer", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// A confidential client able to obtain bearer tokens via the OAuth2
/// client-credentials grant.
///
/// Tokens are cached in process memory keyed by the requested scope set;
/// [`acquire_token`](Self::acquire_token) checks the cache ("silent"
/// acquisition) before going to the network.
///
/// # Thread Safety
///
/// The cache sits behind a [`tokio::sync::RwLock`], so a `ConfidentialClient`
/// can be shared across tasks; concurrent refreshes serialize on the write
/// lock.
///
/// # Example
///
/// ```no_run
/// use iothub_rs::auth::ConfidentialClient;
/// use secrecy::SecretString;
///
/// # async fn example() -> iothub_rs::Result<()> {
/// let auth = ConfidentialClient::new(
///     "my-tenant",
///     "my-client-id",
///     SecretString::from("my-client-secret"),
/// );
/// let token = auth.acquire_token(&["api://iothub/.default".into()]).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfidentialClient {
    http: reqwest::Client,
    authority: String,
    tenant: String,
    client_id: String,
    client_secret: SecretString,
    cache: RwLock<HashMap<String, Token>>,
}

impl ConfidentialClient {
    /// Create a confidential client against the public cloud authority.
    pub fn new(
        tenant: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: SecretString,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            authority: DEFAULT_AUTHORITY.to_string(),
            tenant: tenant.into(),
            client_id: client_id.into(),
            client_secret,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Override the identity-provider base URL (sovereign clouds, tests).
    pub fn with_authority(mut self, authority: impl Into<String>) -> Self {
        self.authority = authority.into();
        self
    }

    /// The tenant-scoped token endpoint this client talks to.
    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.authority.trim_end_matches('/'),
            self.tenant
        )
    }

    /// Zero-network lookup of a cached, unexpired token for `scopes`.
    pub async fn acquire_token_silent(&self, scopes: &[String]) -> Option<Token> {
        let cache = self.cache.read().await;
        cache
            .get(&cache_key(scopes))
            .filter(|token| !token.is_expired())
            .cloned()
    }

    /// Get a token for `scopes`: from the cache if possible, otherwise via
    /// one client-credentials grant, which is then cached.
    ///
    /// # Errors
    ///
    /// [`Error::Auth`] if the provider's reply carries no `access_token`
    /// field; the reply's `error`, `error_description` and
    /// `correlation_id` diagnostics are passed through.
    pub async fn acquire_token(&self, scopes: &[String]) -> Result<Token> {
        if let Some(token) = self.acquire_token_silent(scopes).await {
            return Ok(token);
        }

        let token = self.request_token(scopes).await?;
        self.cache
            .write()
            .await
            .insert(cache_key(scopes), token.clone());
        Ok(token)
    }

    async fn request_token(&self, scopes: &[String]) -> Result<Token> {
        let endpoint = self.token_endpoint();
        debug!(endpoint, "requesting token via client-credentials grant");

        let response = self
            .http
            .post(&endpoint)
            .form(&[
                ("grant_type", "client_credentials"),
                ("client_id", &self.client_id),
                ("client_secret", self.client_secret.expose_secret()),
                ("scope", &scopes.join(" ")),
            ])
            .send()
            .await?;

        // The failure signal is the absence of an access_token field in
        // the reply, not the HTTP status.
        let body = response.bytes().await?;
        let reply: TokenReply = serde_json::from_slice(&body).map_err(Error::Decode)?;

        match reply.access_token {
            Some(bearer) => {
                let lifetime = reply.expires_in.unwrap_or(DEFAULT_LIFETIME_SECS);
                Ok(Token {
                    bearer: SecretString::from(bearer),
                    expires_at: Utc::now() + Duration::seconds(lifetime),
                })
            }
            None => Err(Error::Auth {
                error: reply.error.unwrap_or_else(|| "unknown_error".to_string()),
                error_description: reply.error_description.unwrap_or_default(),
                correlation_id: reply.correlation_id.unwrap_or_default(),
            }),
        }
    }
}

fn cache_key(scopes: &[String]) -> String {
    scopes.join(" ")
}

/// Wire shape of the token endpoint's reply, success or failure.
#[derive(Debug, Deserialize)]
struct TokenReply {
    access_token: Option<String>,
    expires_in: Option<i64>,
    error: Option<String>,
    error_description: Option<String>,
    correlation_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ConfidentialClient {
        ConfidentialClient::new("t1", "c1", SecretString::from("s1"))
            .with_authority(server.uri())
    }

    fn scopes() -> Vec<String> {
        vec!["x".to_string()]
    }

    #[tokio::test]
    async fn test_grant_request_shape() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/t1/oauth2/v2.0/token"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("client_id=c1"))
            .and(body_string_contains("client_secret=s1"))
            .and(body_string_contains("scope=x"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": "TOK"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = client_for(&server);
        let token = auth.acquire_token(&scopes()).await.unwrap();
        assert_eq!(token.bearer().expose_secret(), "TOK");
        assert!(!token.is_expired());
    }

    #[tokio::test]
    async fn test_second_acquisition_is_silent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/t1/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 3599,
                "access_token": "TOK"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let auth = client_for(&server);
        let first = auth.acquire_token(&scopes()).await.unwrap();
        let second = auth.acquire_token(&scopes()).await.unwrap();
        assert_eq!(
            first.bearer().expose_secret(),
            second.bearer().expose_secret()
        );

        let silent = auth.acquire_token_silent(&scopes()).await.unwrap();
        assert_eq!(silent.bearer().expose_secret(), "TOK");
    }

    #[tokio::test]
    async fn test_expired_token_is_reacquired() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/t1/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "Bearer",
                "expires_in": 0,
                "access_token": "TOK"
            })))
            .expect(2)
            .mount(&server)
            .await;

        let auth = client_for(&server);
        auth.acquire_token(&scopes()).await.unwrap();
        assert!(auth.acquire_token_silent(&scopes()).await.is_none());
        auth.acquire_token(&scopes()).await.unwrap();
    }

    #[tokio::test]
    async fn test_silent_without_cache_is_none() {
        let server = MockServer::start().await;
        let auth = client_for(&server);
        assert!(auth.acquire_token_silent(&scopes()).await.is_none());
    }

    #[tokio::test]
    async fn test_rejected_grant_surfaces_diagnostics() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/t1/oauth2/v2.0/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "invalid_client",
                "error_description": "AADSTS7000215: Invalid client secret provided.",
                "correlation_id": "b5e1f2a0-8a9b-4c3d-9e0f-1a2b3c4d5e6f"
            })))
            .mount(&server)
            .await;

        let auth = client_for(&server);
        match auth.acquire_token(&scopes()).await.unwrap_err() {
            Error::Auth {
                error,
                error_description,
                correlation_id,
            } => {
                assert_eq!(error, "invalid_client");
                assert!(error_description.starts_with("AADSTS7000215"));
                assert_eq!(correlation_id, "b5e1f2a0-8a9b-4c3d-9e0f-1a2b3c4d5e6f");
            }
            other => panic!("expected Auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_access_token_is_the_failure_signal() {
        // Even a 200 reply is a failure when no access_token is present.
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/t1/oauth2/v2.0/token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "token_type": "Bearer" })),
            )
            .mount(&server)
            .await;

        let auth = client_for(&server);
        let err = auth.acquire_token(&scopes()).await.unwrap_err();
        assert!(err.is_auth_error());
    }

    #[test]
    fn test_token_debug_redacts_bearer() {
        let token = Token {
            bearer: SecretString::from("super-secret-token"),
            expires_at: Utc::now(),
        };
        let debug = format!("{token:?}");
        assert!(!debug.contains("super-secret-token"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_token_endpoint_shape() {
        let auth = ConfidentialClient::new("t1", "c1", SecretString::from("s1"));
        assert_eq!(
            auth.token_endpoint(),
            "https://login.microsoftonline.com/t1/oauth2/v2.0/token"
        );
    }
}
