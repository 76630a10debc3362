//! API service modules for the IoT Hub endpoint families.
//!
//! Each service provides methods for one endpoint family: the Asset API
//! (workspaces and asset static records) and the Time Series API (channel
//! catalogs and value queries).

mod assets;
mod time_series;

pub use assets::AssetsService;
pub use time_series::TimeSeriesService;
