//! Data models for the IoT Hub APIs.
//!
//! API responses are passed through as raw [`serde_json::Value`] (the
//! services impose no response schema), so the models here are the
//! request side only:
//!
//! - [`primitives`] - Identifier newtypes (`WorkspaceId`, `AssetId`, ...)
//! - [`query`] - Time Series API request payloads and their builders

pub mod primitives;
pub mod query;

// Re-export commonly used types
pub use primitives::*;
pub use query::*;
