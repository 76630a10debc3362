//! Asset API service: workspaces and asset static records.

use std::sync::Arc;

use serde_json::Value;

use crate::client::ClientInner;
use crate::models::{AssetId, WorkspaceId};
use crate::Result;

/// Service for Asset API operations.
///
/// Responses are returned as raw JSON; the service imposes no schema.
///
/// # Example
///
/// ```no_run
/// use iothub_rs::WorkspaceId;
///
/// # async fn example(client: iothub_rs::IotHubClient) -> iothub_rs::Result<()> {
/// let assets = client
///     .assets()
///     .list_in_workspace(&WorkspaceId::new("w1"))
///     .await?;
/// println!("{}", serde_json::to_string_pretty(&assets).unwrap());
/// # Ok(())
/// # }
/// ```
pub struct AssetsService {
    inner: Arc<ClientInner>,
}

impl AssetsService {
    pub(crate) fn new(inner: Arc<ClientInner>) -> Self {
        Self { inner }
    }

    /// List the assets in a workspace, with their static data.
    pub async fn list_in_workspace(&self, workspace: &WorkspaceId) -> Result<Value> {
        let base = self.inner.endpoints.asset_api()?;
        self.inner
            .get(&format!("{base}Workspaces/{workspace}/assets"))
            .await
    }

    /// Fetch the static record of a single asset.
    pub async fn get(&self, asset: &AssetId) -> Result<Value> {
        let base = self.inner.endpoints.asset_api()?;
        self.inner.get(&format!("{base}Assets/{asset}")).await
    }

    /// List every asset visible to the caller, across workspaces.
    pub async fn my_assets(&self) -> Result<Value> {
        let base = self.inner.endpoints.asset_api()?;
        self.inner.get(&format!("{base}me/Assets")).await
    }
}
