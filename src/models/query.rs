//! Request payloads for the Time Series API query endpoints.
//!
//! The two POST endpoints take a JSON body describing which channels to
//! read and over what window. Payloads are constructed fresh per call via
//! their builders and are not reused afterwards.

use serde::{Deserialize, Serialize};

use crate::models::{AssetId, DataChannelId};
use crate::{Error, Result};

/// How the server should interpret the `dataChannelIds` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DataChannelIdType {
    /// Platform-assigned short id (the form the sample config ships with)
    #[default]
    ShortId,
    /// ISO 19848 local id
    LocalId,
    /// ISO 19848 universal id
    UniversalId,
}

/// Which kind of values a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[non_exhaustive]
pub enum TypeOption {
    /// Time-series data points
    #[default]
    Data,
}

/// Body of `POST TimeSeriesData/.getTimeSeriesData`.
///
/// Build one with [`TimeSeriesQuery::builder`].
///
/// # Example
///
/// ```
/// use iothub_rs::models::TimeSeriesQuery;
///
/// # fn example() -> iothub_rs::Result<()> {
/// let query = TimeSeriesQuery::builder()
///     .asset("4000c0e0-0b16-4c78-ae07-a39749c052e2")
///     .data_channels(["IL1", "IL2"])
///     .range("2018-01-01", "2020-01-05")
///     .down_scale_int("PT60M")
///     .limit(9999)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesQuery {
    /// Server-side downsampling interval (ISO 8601 duration, e.g. `PT60M`).
    /// `None` requests raw values.
    pub down_scale_int: Option<String>,
    /// Start of the requested window
    pub start: String,
    /// End of the requested window
    pub end: String,
    /// Maximum number of values to return
    pub limit: u32,
    /// Assets to read from
    pub asset_ids: Vec<AssetId>,
    /// Channels to read
    pub data_channel_ids: Vec<DataChannelId>,
    /// Interpretation of `data_channel_ids`
    pub data_channel_id_type: DataChannelIdType,
    /// Kind of values to return
    pub type_option: TypeOption,
}

impl TimeSeriesQuery {
    /// Start building a query.
    pub fn builder() -> TimeSeriesQueryBuilder {
        TimeSeriesQueryBuilder::default()
    }
}

/// Builder for [`TimeSeriesQuery`] with validation.
#[derive(Debug, Default, Clone)]
pub struct TimeSeriesQueryBuilder {
    down_scale_int: Option<String>,
    start: Option<String>,
    end: Option<String>,
    limit: Option<u32>,
    asset_ids: Vec<AssetId>,
    data_channel_ids: Vec<DataChannelId>,
    data_channel_id_type: DataChannelIdType,
    type_option: TypeOption,
}

impl TimeSeriesQueryBuilder {
    /// Create a new query builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request server-side downsampling at the given ISO 8601 interval.
    pub fn down_scale_int(mut self, interval: impl Into<String>) -> Self {
        self.down_scale_int = Some(interval.into());
        self
    }

    /// Set the time range to query.
    pub fn range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    /// Set the maximum number of values to return.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Add a single asset to read from.
    pub fn asset(mut self, asset: impl Into<AssetId>) -> Self {
        self.asset_ids.push(asset.into());
        self
    }

    /// Set the assets to read from.
    pub fn assets<I, T>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<AssetId>,
    {
        self.asset_ids = assets.into_iter().map(Into::into).collect();
        self
    }

    /// Set the channels to read.
    pub fn data_channels<I, T>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DataChannelId>,
    {
        self.data_channel_ids = channels.into_iter().map(Into::into).collect();
        self
    }

    /// Set how the channel ids should be interpreted.
    pub fn data_channel_id_type(mut self, id_type: DataChannelIdType) -> Self {
        self.data_channel_id_type = id_type;
        self
    }

    /// Set the kind of values to return.
    pub fn type_option(mut self, option: TypeOption) -> Self {
        self.type_option = option;
        self
    }

    /// Build the query, validating all fields.
    pub fn build(self) -> Result<TimeSeriesQuery> {
        let start = self
            .start
            .ok_or_else(|| Error::InvalidInput("query requires a time range".to_string()))?;
        let end = self
            .end
            .ok_or_else(|| Error::InvalidInput("query requires a time range".to_string()))?;

        if self.asset_ids.is_empty() {
            return Err(Error::InvalidInput(
                "query requires at least one asset id".to_string(),
            ));
        }
        if self.data_channel_ids.is_empty() {
            return Err(Error::InvalidInput(
                "query requires at least one data channel id".to_string(),
            ));
        }

        Ok(TimeSeriesQuery {
            down_scale_int: self.down_scale_int,
            start,
            end,
            limit: self.limit.unwrap_or(10_000),
            asset_ids: self.asset_ids,
            data_channel_ids: self.data_channel_ids,
            data_channel_id_type: self.data_channel_id_type,
            type_option: self.type_option,
        })
    }
}

/// Body of `POST TimeSeriesData/.latest`.
///
/// Asks for the newest `latestNValues` samples per (asset, channel) pair
/// instead of an explicit time range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestQuery {
    /// Number of newest values to return per channel
    #[serde(rename = "latestNValues")]
    pub latest_n_values: u32,
    /// Assets to read from
    pub asset_ids: Vec<AssetId>,
    /// Channels to read
    pub data_channel_ids: Vec<DataChannelId>,
    /// Interpretation of `data_channel_ids`
    pub data_channel_id_type: DataChannelIdType,
    /// Kind of values to return
    pub type_option: TypeOption,
}

impl LatestQuery {
    /// Start building a latest-values query.
    pub fn builder() -> LatestQueryBuilder {
        LatestQueryBuilder::default()
    }
}

/// Builder for [`LatestQuery`] with validation.
#[derive(Debug, Default, Clone)]
pub struct LatestQueryBuilder {
    latest_n_values: Option<u32>,
    asset_ids: Vec<AssetId>,
    data_channel_ids: Vec<DataChannelId>,
    data_channel_id_type: DataChannelIdType,
    type_option: TypeOption,
}

impl LatestQueryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of newest values to return per channel.
    pub fn latest_n_values(mut self, n: u32) -> Self {
        self.latest_n_values = Some(n);
        self
    }

    /// Add a single asset to read from.
    pub fn asset(mut self, asset: impl Into<AssetId>) -> Self {
        self.asset_ids.push(asset.into());
        self
    }

    /// Set the assets to read from.
    pub fn assets<I, T>(mut self, assets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<AssetId>,
    {
        self.asset_ids = assets.into_iter().map(Into::into).collect();
        self
    }

    /// Set the channels to read.
    pub fn data_channels<I, T>(mut self, channels: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<DataChannelId>,
    {
        self.data_channel_ids = channels.into_iter().map(Into::into).collect();
        self
    }

    /// Set how the channel ids should be interpreted.
    pub fn data_channel_id_type(mut self, id_type: DataChannelIdType) -> Self {
        self.data_channel_id_type = id_type;
        self
    }

    /// Set the kind of values to return.
    pub fn type_option(mut self, option: TypeOption) -> Self {
        self.type_option = option;
        self
    }

    /// Build the query, validating all fields.
    pub fn build(self) -> Result<LatestQuery> {
        if self.asset_ids.is_empty() {
            return Err(Error::InvalidInput(
                "query requires at least one asset id".to_string(),
            ));
        }
        if self.data_channel_ids.is_empty() {
            return Err(Error::InvalidInput(
                "query requires at least one data channel id".to_string(),
            ));
        }

        Ok(LatestQuery {
            latest_n_values: self.latest_n_values.unwrap_or(1),
            asset_ids: self.asset_ids,
            data_channel_ids: self.data_channel_ids,
            data_channel_id_type: self.data_channel_id_type,
            type_option: self.type_option,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_wire_shape() {
        let query = TimeSeriesQuery::builder()
            .asset("a1")
            .data_channels(["IL1", "IL2"])
            .range("2018-01-01", "2020-01-05")
            .down_scale_int("PT60M")
            .limit(9999)
            .build()
            .unwrap();

        let wire = serde_json::to_value(&query).unwrap();
        assert_eq!(
            wire,
            serde_json::json!({
                "downScaleInt": "PT60M",
                "start": "2018-01-01",
                "end": "2020-01-05",
                "limit": 9999,
                "assetIds": ["a1"],
                "dataChannelIds": ["IL1", "IL2"],
                "dataChannelIdType": "ShortId",
                "typeOption": "Data"
            })
        );
    }

    #[test]
    fn test_query_raw_values_omit_nothing() {
        // A raw (non-downsampled) query still serializes downScaleInt as
        // an explicit null.
        let query = TimeSeriesQuery::builder()
            .asset("a1")
            .data_channels(["IL1"])
            .range("2018-01-01", "2020-01-05")
            .limit(100)
            .build()
            .unwrap();

        let wire = serde_json::to_value(&query).unwrap();
        assert_eq!(wire["downScaleInt"], serde_json::Value::Null);
    }

    #[test]
    fn test_query_requires_range() {
        let result = TimeSeriesQuery::builder()
            .asset("a1")
            .data_channels(["IL1"])
            .build();
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_query_requires_channels() {
        let result = TimeSeriesQuery::builder()
            .asset("a1")
            .range("2018-01-01", "2020-01-05")
            .build();
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_latest_wire_shape() {
        let query = LatestQuery::builder()
            .asset("a1")
            .data_channels(["IL1", "IL2"])
            .latest_n_values(1)
            .build()
            .unwrap();

        let wire = serde_json::to_value(&query).unwrap();
        assert_eq!(
            wire,
            serde_json::json!({
                "latestNValues": 1,
                "assetIds": ["a1"],
                "dataChannelIds": ["IL1", "IL2"],
                "dataChannelIdType": "ShortId",
                "typeOption": "Data"
            })
        );
    }

    #[test]
    fn test_latest_requires_assets() {
        let result = LatestQuery::builder().data_channels(["IL1"]).build();
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }
}
