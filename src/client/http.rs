//! HTTP client implementation for the IoT Hub APIs.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::api::{AssetsService, TimeSeriesService};
use crate::auth::{ConfidentialClient, Token};
use crate::settings::Settings;
use crate::{Error, Result};

use super::config::{ApiEndpoints, ClientConfig, SUBSCRIPTION_KEY_HEADER};

/// The main client for the IoT Hub Asset and Time Series APIs.
///
/// One `IotHubClient` is the session object for a process: it owns the
/// confidential-client credentials, the cached token, the configured
/// endpoints and the HTTP transport, and hands out the per-endpoint-family
/// services.
///
/// Authentication is explicit: call [`authenticate`](Self::authenticate)
/// once up front. Operations require an unexpired cached token and never
/// re-acquire one themselves.
///
/// # Example
///
/// ```no_run
/// use iothub_rs::{IotHubClient, Settings, WorkspaceId};
///
/// # async fn example() -> iothub_rs::Result<()> {
/// let settings = Settings::load("config.json")?;
/// let client = IotHubClient::from_settings(&settings)?;
/// client.authenticate().await?;
///
/// let assets = client
///     .assets()
///     .list_in_workspace(&WorkspaceId::new(settings.work_space_id()?))
///     .await?;
/// println!("{}", serde_json::to_string_pretty(&assets).unwrap());
/// # Ok(())
/// # }
/// ```
pub struct IotHubClient {
    pub(crate) inner: Arc<ClientInner>,
}

pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) auth: ConfidentialClient,
    pub(crate) scopes: Vec<String>,
    pub(crate) endpoints: ApiEndpoints,
    pub(crate) config: ClientConfig,
}

impl IotHubClient {
    /// Create a client from a loaded settings document.
    ///
    /// The client-identity keys (`tenant`, `client_id`, `client_secret`,
    /// `scope`) are required here; endpoint keys are picked up if present
    /// and otherwise fail at first use.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let mut auth = ConfidentialClient::new(
            settings.tenant()?,
            settings.client_id()?,
            settings.client_secret()?.clone(),
        );
        if let Some(authority) = settings.authority() {
            auth = auth.with_authority(authority);
        }

        Self::with_config(
            auth,
            settings.scope()?.to_vec(),
            ApiEndpoints::from_settings(settings),
            ClientConfig::default(),
        )
    }

    /// Create a client from already-assembled parts.
    pub fn new(
        auth: ConfidentialClient,
        scopes: Vec<String>,
        endpoints: ApiEndpoints,
    ) -> Result<Self> {
        Self::with_config(auth, scopes, endpoints, ClientConfig::default())
    }

    /// Create a client with custom configuration.
    pub fn with_config(
        auth: ConfidentialClient,
        scopes: Vec<String>,
        endpoints: ApiEndpoints,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http,
                auth,
                scopes,
                endpoints,
                config,
            }),
        })
    }

    /// Acquire a bearer token for the configured scopes.
    ///
    /// Silent-first: a cached unexpired token is returned without any
    /// network activity; otherwise one client-credentials grant is
    /// performed and its result cached. This is the only place the client
    /// acquires tokens.
    pub async fn authenticate(&self) -> Result<Token> {
        self.inner.auth.acquire_token(&self.inner.scopes).await
    }

    /// Get the Asset API service.
    pub fn assets(&self) -> AssetsService {
        AssetsService::new(self.inner.clone())
    }

    /// Get the Time Series API service.
    pub fn time_series(&self) -> TimeSeriesService {
        TimeSeriesService::new(self.inner.clone())
    }

    /// Get a reference to the token provider.
    pub fn auth(&self) -> &ConfidentialClient {
        &self.inner.auth
    }
}

impl ClientInner {
    /// Build the two headers every call carries.
    ///
    /// Fails with [`Error::TokenExpired`] when no unexpired token is
    /// cached; operations do not trigger re-authentication.
    pub(crate) async fn build_headers(&self) -> Result<HeaderMap> {
        let token = self
            .auth
            .acquire_token_silent(&self.scopes)
            .await
            .ok_or(Error::TokenExpired)?;

        let mut headers = HeaderMap::new();

        let bearer = format!("Bearer {}", token.bearer().expose_secret());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&bearer)
                .map_err(|_| Error::InvalidInput("invalid token format".to_string()))?,
        );

        let key = self.endpoints.subscription_key()?;
        headers.insert(
            SUBSCRIPTION_KEY_HEADER,
            HeaderValue::from_str(key.expose_secret())
                .map_err(|_| Error::InvalidInput("invalid subscription key format".to_string()))?,
        );

        Ok(headers)
    }

    /// Make an authenticated GET request.
    pub(crate) async fn get(&self, url: &str) -> Result<Value> {
        let headers = self.build_headers().await?;

        debug!(url, "GET");
        let response = self.http.get(url).headers(headers).send().await?;

        self.handle_response(response).await
    }

    /// Make an authenticated POST request with a JSON body.
    pub(crate) async fn post<B: Serialize>(&self, url: &str, body: &B) -> Result<Value> {
        let headers = self.build_headers().await?;

        debug!(url, "POST");
        let response = self
            .http
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle an API response.
    ///
    /// A status of 300 or above is a status failure and the body is not
    /// decoded. Below 300, the body is decoded as JSON; a body that is not
    /// JSON is a decode failure, reported distinctly.
    async fn handle_response(&self, response: reqwest::Response) -> Result<Value> {
        let status = response.status().as_u16();

        if status >= 300 {
            warn!(status, "call failed");
            return Err(Error::Status { status });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(Error::Decode)
    }
}

impl Clone for IotHubClient {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl std::fmt::Debug for IotHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IotHubClient")
            .field("config", &self.inner.config)
            .finish()
    }
}
