//! CLI subcommands

pub mod dashboard;
pub mod show;
pub mod tabs;

use crate::api::{load_snapshot, ApiClient};
use crate::config::Config;
use crate::dashboard::Snapshot;
use anyhow::{Context, Result};

/// Connect to the configured backend and fetch nodes, then metrics
async fn load(config: &Config) -> Result<(ApiClient, Snapshot)> {
    let client = ApiClient::new(&config.server_url, config.timeout())?;
    let snapshot = load_snapshot(&client)
        .await
        .with_context(|| format!("Failed to load dashboard data from {}", client.base_url()))?;
    Ok((client, snapshot))
}
