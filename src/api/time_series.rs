//! Time Series API service: channel catalogs and value queries.

use std::sync::Arc;

use serde_json::Value;

use crate::client::ClientInner;
use crate::models::{AssetId, LatestQuery, TimeSeriesQuery};
use crate::Result;

/// Service for Time Series API operations.
///
/// Listing and catalog calls are GETs; the two value queries POST a JSON
/// payload built with the [`TimeSeriesQuery`] / [`LatestQuery`] builders.
/// Responses are returned as raw JSON.
///
/// # Example
///
/// ```no_run
/// use iothub_rs::models::LatestQuery;
///
/// # async fn example(client: iothub_rs::IotHubClient) -> iothub_rs::Result<()> {
/// let query = LatestQuery::builder()
///     .asset("4000c0e0-0b16-4c78-ae07-a39749c052e2")
///     .data_channels(["IL1", "IL2"])
///     .latest_n_values(1)
///     .build()?;
/// let newest = client.time_series().latest(&query).await?;
/// # Ok(())
/// # }
/// ```
pub struct TimeSeriesService {
    inner: Arc<ClientInner>,
}

impl TimeSeriesService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List every asset visible to the caller.
    ///
    /// Alternate, workspace-unscoped counterpart of
    /// [`AssetsService::list_in_workspace`](crate::api::AssetsService::list_in_workspace).
    pub async fn assets(&self) -> Result<Value> {
        let base = self.inner.endpoints.time_series_api()?;
        self.inner.get(&format!("{base}Assets")).await
    }

    /// Fetch the data-channel catalog of an asset.
    pub async fn data_channel_list(&self, asset: &AssetId) -> Result<Value> {
        let base = self.inner.endpoints.time_series_api()?;
        self.inner
            .get(&format!("{base}DataChannelList/{asset}"))
            .await
    }

    /// Fetch the time-series metadata of an asset.
    pub async fn metadata(&self, asset: &AssetId) -> Result<Value> {
        let base = self.inner.endpoints.time_series_api()?;
        self.inner.get(&format!("{base}Metadata/{asset}")).await
    }

    /// Fetch values for a set of (asset, channel) pairs over an explicit
    /// time range, optionally downsampled server-side.
    pub async fn query(&self, query: &TimeSeriesQuery) -> Result<Value> {
        let base = self.inner.endpoints.time_series_api()?;
        self.inner
            .post(&format!("{base}TimeSeriesData/.getTimeSeriesData"), query)
            .await
    }

    /// Fetch the newest N values for a set of (asset, channel) pairs.
    pub async fn latest(&self, query: &LatestQuery) -> Result<Value> {
        let base = self.inner.endpoints.time_series_api()?;
        self.inner
            .post(&format!("{base}TimeSeriesData/.latest"), query)
            .await
    }
}
