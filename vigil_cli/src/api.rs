//! HTTP client for the metrics backend

use crate::dashboard::Snapshot;
use serde::de::DeserializeOwned;
use std::time::Duration;
use vigil_common::constants::{METRICS_PATH, NODES_PATH};
use vigil_common::{ApiResponse, DashboardError, MetricsPayload, Node};

/// Thin wrapper around `reqwest` for the two read endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DashboardError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vigil/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DashboardError::NetworkFailure(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_nodes(&self) -> Result<Vec<Node>, DashboardError> {
        self.get(NODES_PATH).await
    }

    pub async fn fetch_metrics(&self) -> Result<MetricsPayload, DashboardError> {
        self.get(METRICS_PATH).await
    }

    /// GET an endpoint and unwrap its `{ "data": ... }` envelope
    async fn get<T: DeserializeOwned>(&self, path: &'static str) -> Result<T, DashboardError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DashboardError::NetworkFailure(format!("GET {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DashboardError::NetworkFailure(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| DashboardError::NetworkFailure(format!("Reading {} failed: {}", url, e)))?;

        let envelope: ApiResponse<T> = serde_json::from_str(&body).map_err(|source| {
            DashboardError::MalformedPayload {
                endpoint: path,
                source,
            }
        })?;

        Ok(envelope.data)
    }
}

/// Fetch the roster, then the metrics.
///
/// The roster is fetched first so the node grid can be built before any
/// metrics are attached to it.
pub async fn load_snapshot(client: &ApiClient) -> Result<Snapshot, DashboardError> {
    let nodes = client.fetch_nodes().await?;
    tracing::info!(
        "Backend has {} node(s), {} of which are active.",
        nodes.len(),
        nodes.iter().filter(|n| n.live).count()
    );

    let metrics = client.fetch_metrics().await?;
    tracing::info!("Retrieved metrics for {} tab(s)", metrics.len());

    Ok(Snapshot::new(nodes, metrics))
}
