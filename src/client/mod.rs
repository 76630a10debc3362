//! HTTP client and session layer for the IoT Hub APIs.
//!
//! This module provides the main entry point [`IotHubClient`]: one session
//! object owning the loaded configuration, the cached token, and the HTTP
//! transport.
//!
//! # Example
//!
//! ```no_run
//! use iothub_rs::{IotHubClient, Settings};
//!
//! # async fn example() -> iothub_rs::Result<()> {
//! let settings = Settings::load("config.json")?;
//! let client = IotHubClient::from_settings(&settings)?;
//! client.authenticate().await?;
//!
//! // List all assets visible to the caller
//! let assets = client.assets().my_assets().await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod http;

pub use config::{ApiEndpoints, ClientConfig, SUBSCRIPTION_KEY_HEADER};
pub use http::IotHubClient;
pub(crate) use http::ClientInner;
