//! Demo walking the IoT Hub APIs end to end.
//!
//! Loads `config.json` (or the file given as the first process argument),
//! acquires a bearer token, then runs the example calls in sequence,
//! printing each JSON response to the console. Per-call failures are
//! printed and the demo continues; configuration and authentication
//! failures stop it before anything else runs.
//!
//! Run with: cargo run --bin iothub-demo -- path/to/config.json

use iothub_rs::models::{LatestQuery, TimeSeriesQuery};
use iothub_rs::settings::DEFAULT_SETTINGS_PATH;
use iothub_rs::{AssetId, Error, IotHubClient, Settings, WorkspaceId};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string());

    let settings = match Settings::load(&path) {
        Ok(settings) => settings,
        Err(err) => {
            println!("{err}");
            println!(
                "Either add ./{DEFAULT_SETTINGS_PATH} or specify the file as the first parameter"
            );
            return;
        }
    };

    let client = match IotHubClient::from_settings(&settings) {
        Ok(client) => client,
        Err(err) => {
            println!("{err}");
            return;
        }
    };

    match client.authenticate().await {
        Ok(_) => println!("Acquired token successfully"),
        Err(Error::Auth {
            error,
            error_description,
            correlation_id,
        }) => {
            println!("{error}");
            println!("{error_description}");
            println!("{correlation_id}");
            return;
        }
        Err(err) => {
            println!("{err}");
            return;
        }
    }

    // Example 1a - assets and their static data, limited to one workspace
    if let Ok(workspace) = settings.work_space_id().map(WorkspaceId::new) {
        println!("Making call to Asset API to get the list of assets in workspace {workspace}");
        report(client.assets().list_in_workspace(&workspace).await);
    }

    // Example 1b - alternate method: every asset visible to the caller
    println!("Making call to Time Series API to get the list of assets");
    report(client.time_series().assets().await);

    let Ok(asset) = settings.asset_id().map(AssetId::new) else {
        return;
    };

    // Example 2 - static data for an individual asset
    println!("Making call to Asset API to get static data for asset {asset}");
    report(client.assets().get(&asset).await);

    // Example 3 - data channel list and metadata for that asset
    println!("Making call to Time Series API to get the data channel list");
    report(client.time_series().data_channel_list(&asset).await);

    println!("Making call to Time Series API to get asset metadata");
    report(client.time_series().metadata(&asset).await);

    let Ok(signals) = settings.signal_ids() else {
        return;
    };

    // Example 4 - values over a range, downsampled to 60-minute buckets
    println!("Making call to Time Series API to get downsampled data");
    match TimeSeriesQuery::builder()
        .asset(asset.clone())
        .data_channels(signals.iter().cloned())
        .range("2018-01-01", "2020-01-05")
        .down_scale_int("PT60M")
        .limit(9999)
        .build()
    {
        Ok(query) => report(client.time_series().query(&query).await),
        Err(err) => println!("{err}"),
    }

    // Example 5 - newest data point per channel
    println!("Making call to Time Series API to get the latest data point");
    match LatestQuery::builder()
        .asset(asset)
        .data_channels(signals.iter().cloned())
        .latest_n_values(1)
        .build()
    {
        Ok(query) => report(client.time_series().latest(&query).await),
        Err(err) => println!("{err}"),
    }
}

/// Print a call's JSON result, or its failure, and keep going either way.
fn report(result: iothub_rs::Result<serde_json::Value>) {
    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(pretty) => println!("{pretty}"),
            Err(_) => println!("{value}"),
        },
        Err(err) => println!("{err}"),
    }
}
