//! Primitive types and newtypes for type-safe API interactions.
//!
//! This module provides strongly-typed wrappers around string identifiers
//! to prevent mixing up different kinds of IDs at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A strongly-typed workspace identifier.
///
/// Workspaces are the containers assets live in on the Asset API.
///
/// # Example
///
/// ```
/// use iothub_rs::WorkspaceId;
///
/// let workspace = WorkspaceId::new("a1b2c3d4");
/// println!("Workspace: {}", workspace);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(String);

impl WorkspaceId {
    /// Create a new workspace id from a string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the workspace id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for WorkspaceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for WorkspaceId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for WorkspaceId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A strongly-typed asset identifier.
///
/// Asset ids are GUIDs assigned by the platform, shared between the Asset
/// API and the Time Series API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(String);

impl AssetId {
    /// Create a new asset id.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the asset id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for AssetId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for AssetId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AssetId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A strongly-typed data-channel identifier (e.g. `"IL1"`).
///
/// How the server interprets the value is controlled by
/// [`DataChannelIdType`](crate::models::DataChannelIdType) on the query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataChannelId(String);

impl DataChannelId {
    /// Create a new data-channel id.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the data-channel id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for DataChannelId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for DataChannelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for DataChannelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_id() {
        let workspace = WorkspaceId::new("w1");
        assert_eq!(workspace.as_str(), "w1");
        assert_eq!(workspace.to_string(), "w1");
    }

    #[test]
    fn test_asset_id() {
        let asset: AssetId = "4000c0e0-0b16-4c78-ae07-a39749c052e2".into();
        assert_eq!(asset.as_str(), "4000c0e0-0b16-4c78-ae07-a39749c052e2");
    }

    #[test]
    fn test_data_channel_id_serde_transparent() {
        let channel = DataChannelId::new("IL1");
        assert_eq!(serde_json::to_string(&channel).unwrap(), r#""IL1""#);
    }
}
