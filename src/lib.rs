//! # iothub-rs
//!
//! A Rust client for the DNV IoT Hub Asset and Time Series APIs.
//!
//! This crate wraps the two REST APIs behind one session object: load a
//! settings document, acquire an OAuth2 bearer token via the
//! client-credentials grant (with a silent in-process cache), then issue
//! authenticated calls that return the raw JSON the service answers with.
//!
//! ## Features
//!
//! - **Authentication**: OAuth2 client-credentials grant against a
//!   tenant-scoped authority, with silent token caching
//! - **Asset API**: workspace asset listings and asset static records
//! - **Time Series API**: data-channel catalogs, metadata, range queries
//!   with server-side downsampling, and latest-N queries
//! - **Typed failures**: settings, authentication, HTTP-status and
//!   JSON-decode failures are distinct variants, so callers decide whether
//!   to continue, retry, or abort
//! - **Async-first**: built on Tokio and reqwest
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use iothub_rs::{IotHubClient, Settings, WorkspaceId};
//!
//! #[tokio::main]
//! async fn main() -> iothub_rs::Result<()> {
//!     // Load config.json and build the session
//!     let settings = Settings::load("config.json")?;
//!     let client = IotHubClient::from_settings(&settings)?;
//!
//!     // One up-front token acquisition; operations reuse the cached token
//!     client.authenticate().await?;
//!
//!     // List the assets in a workspace
//!     let workspace = WorkspaceId::new(settings.work_space_id()?);
//!     let assets = client.assets().list_in_workspace(&workspace).await?;
//!     println!("{}", serde_json::to_string_pretty(&assets).unwrap());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Querying time-series values
//!
//! ```rust,no_run
//! use iothub_rs::models::TimeSeriesQuery;
//!
//! # async fn example(client: iothub_rs::IotHubClient) -> iothub_rs::Result<()> {
//! let query = TimeSeriesQuery::builder()
//!     .asset("4000c0e0-0b16-4c78-ae07-a39749c052e2")
//!     .data_channels(["IL1", "IL2"])
//!     .range("2018-01-01", "2020-01-05")
//!     .down_scale_int("PT60M") // 60-minute buckets
//!     .limit(9999)
//!     .build()?;
//!
//! let values = client.time_series().query(&query).await?;
//! println!("{values}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod settings;

// Re-export primary types at crate root for convenience
pub use error::{Error, Result};
pub use models::{AssetId, DataChannelId, WorkspaceId};
pub use client::{ApiEndpoints, ClientConfig, IotHubClient};
pub use auth::ConfidentialClient;
pub use settings::Settings;

/// Prelude module for convenient imports.
///
/// ```rust
/// use iothub_rs::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::models::{
        // Primitives
        AssetId, DataChannelId, WorkspaceId,
        // Query payloads
        DataChannelIdType, LatestQuery, LatestQueryBuilder, TimeSeriesQuery,
        TimeSeriesQueryBuilder, TypeOption,
    };
    pub use crate::client::{ApiEndpoints, ClientConfig, IotHubClient};
    pub use crate::auth::{ConfidentialClient, Token};
    pub use crate::settings::Settings;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_id_creation() {
        let workspace = WorkspaceId::new("w1");
        assert_eq!(workspace.as_str(), "w1");
    }

    #[test]
    fn test_default_authority() {
        assert_eq!(auth::DEFAULT_AUTHORITY, "https://login.microsoftonline.com");
    }

    #[test]
    fn test_query_defaults() {
        use models::{DataChannelIdType, TypeOption};
        assert_eq!(DataChannelIdType::default(), DataChannelIdType::ShortId);
        assert_eq!(TypeOption::default(), TypeOption::Data);
    }
}
