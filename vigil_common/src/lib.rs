//! Vigil Common - Shared data model for the fleet latency dashboard
//!
//! This crate contains the wire types returned by the metrics backend, the
//! HTTP status classifier, and the error taxonomy used by the CLI.

pub mod status;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

pub use status::{classify, reason_phrase, Severity};

/// Dashboard errors
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Network failure: {0}")]
    NetworkFailure(String),

    #[error("Malformed payload from {endpoint}: {source}")]
    MalformedPayload {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },
}

impl DashboardError {
    pub fn tab_not_found(name: &str) -> Self {
        DashboardError::NotFound {
            kind: "Tab",
            name: name.to_string(),
        }
    }
}

/// Response envelope used by every backend endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Status code echoed in the body (informational)
    #[serde(default)]
    pub code: Option<i64>,

    pub data: T,
}

/// A monitored node as reported by `/v1/nodes`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique node name, used as the lookup key
    pub name: String,

    /// Short glyph or emoji shown next to the node
    #[serde(default, deserialize_with = "null_as_empty")]
    pub icon: String,

    /// Free-form description (location, provider, ...)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub info: String,

    /// Whether the node is currently reporting
    #[serde(default)]
    pub live: bool,
}

impl Node {
    /// Filler entry used to keep the node grid at a stable size
    pub fn placeholder() -> Self {
        Self {
            name: String::new(),
            icon: constants::PLACEHOLDER_ICON.to_string(),
            info: String::new(),
            live: false,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name.is_empty()
    }
}

/// Per-node measurements for one tab
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeMetrics {
    /// Round-trip latency (ms)
    pub rwl: f64,

    /// Time to first byte (ms)
    pub tfb: f64,

    /// Observed HTTP status code
    pub htc: i64,

    /// Server-side compute time (ms), when the target exposes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpt: Option<f64>,

    /// TCP connect time (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcp: Option<f64>,

    /// TLS handshake time (ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls: Option<f64>,
}

impl NodeMetrics {
    pub fn new(rwl: f64, tfb: f64, htc: i64) -> Self {
        Self {
            rwl,
            tfb,
            htc,
            cpt: None,
            tcp: None,
            tls: None,
        }
    }
}

/// Aggregate and per-node metrics for one tab (monitored endpoint)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabMetrics {
    /// Fleet-wide aggregate, field name -> value
    #[serde(default)]
    pub overall: IndexMap<String, f64>,

    /// Node name -> measurements
    #[serde(default)]
    pub nodes: IndexMap<String, NodeMetrics>,
}

impl TabMetrics {
    /// A tab with no reporting nodes has no data, whatever `overall` says
    pub fn has_data(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Aggregate HTTP status code, if the backend reported one
    pub fn http_status(&self) -> Option<i64> {
        self.overall
            .get(constants::HTTP_STATUS_FIELD)
            .map(|code| *code as i64)
    }
}

/// Tab name -> metrics, in the backend's order
pub type MetricsPayload = IndexMap<String, TabMetrics>;

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Constants shared by the dashboard
pub mod constants {
    /// Node roster endpoint
    pub const NODES_PATH: &str = "/v1/nodes";

    /// Metrics payload endpoint
    pub const METRICS_PATH: &str = "/v1/metrics";

    /// The node grid is padded to at least this many cards
    pub const MIN_DISPLAY_NODES: usize = 4;

    /// Tab selected on first render
    pub const DEFAULT_TAB: &str = "Main";

    /// `overall` field carrying the HTTP status code
    pub const HTTP_STATUS_FIELD: &str = "htc";

    /// Icon for padding cards and for nodes missing from the roster
    pub const PLACEHOLDER_ICON: &str = "-";

    /// Text shown for fields of a tab without data
    pub const NOT_AVAILABLE: &str = "N/A";

    /// Default layout of labeled aggregate fields
    pub const DEFAULT_FIELDS: &[&str] = &["rwl", "tfb", "tcp", "tls", "cpt", "htc"];
}
