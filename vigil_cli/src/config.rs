//! CLI configuration management

use crate::dashboard::{DashboardOptions, PopupMode};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use vigil_common::constants::{DEFAULT_FIELDS, DEFAULT_TAB, MIN_DISPLAY_NODES};

/// Get the configuration directory path
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vigil")
    }

    #[cfg(not(target_os = "windows"))]
    {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vigil")
    }
}

/// Get the config file path
pub fn config_file() -> PathBuf {
    config_dir().join("config.yml")
}

/// Get the logs directory
pub fn logs_dir() -> PathBuf {
    config_dir().join("logs")
}

/// Log file used while the TUI owns the terminal
pub fn log_file() -> PathBuf {
    logs_dir().join("vigil.log")
}

/// Ensure all config directories exist
pub fn ensure_dirs() -> Result<()> {
    fs::create_dir_all(config_dir()).context("Failed to create config directory")?;
    fs::create_dir_all(logs_dir()).context("Failed to create logs directory")?;
    Ok(())
}

/// Main configuration file structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Metrics backend URL (default: http://localhost:8000)
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Tab shown on startup
    #[serde(default = "default_tab")]
    pub default_tab: String,

    /// Node grid is padded with placeholder cards up to this size
    #[serde(default = "default_min_display_nodes")]
    pub min_display_nodes: usize,

    /// Show the per-node HTTP status popup
    #[serde(default = "default_popup")]
    pub popup: bool,

    /// Aggregate fields that always get a label, in display order
    #[serde(default = "default_fields")]
    pub fields: Vec<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_tab() -> String {
    DEFAULT_TAB.to_string()
}

fn default_min_display_nodes() -> usize {
    MIN_DISPLAY_NODES
}

fn default_popup() -> bool {
    true
}

fn default_fields() -> Vec<String> {
    DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            default_tab: default_tab(),
            min_display_nodes: default_min_display_nodes(),
            popup: default_popup(),
            fields: default_fields(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from file
    pub fn load() -> Result<Self> {
        let path = config_file();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        Self::from_yaml(&content)
    }

    fn from_yaml(content: &str) -> Result<Self> {
        // An empty file is treated like a missing one
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Failed to parse config file")
    }

    /// Apply command-line overrides
    pub fn with_server(mut self, server: Option<String>) -> Self {
        if let Some(server) = server {
            self.server_url = server;
        }
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Dashboard options, with per-invocation overrides
    pub fn dashboard_options(&self, tab: Option<String>, no_popup: bool) -> DashboardOptions {
        DashboardOptions {
            default_tab: tab.unwrap_or_else(|| self.default_tab.clone()),
            min_display_nodes: self.min_display_nodes,
            fields: self.fields.clone(),
            popup: if self.popup && !no_popup {
                PopupMode::Enabled
            } else {
                PopupMode::Disabled
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_uses_defaults() {
        let config = Config::from_yaml("server_url: https://status.example.com\npopup: false\n").unwrap();
        assert_eq!(config.server_url, "https://status.example.com");
        assert!(!config.popup);
        assert_eq!(config.default_tab, "Main");
        assert_eq!(config.min_display_nodes, 4);
        assert_eq!(config.fields, vec!["rwl", "tfb", "tcp", "tls", "cpt", "htc"]);
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
        assert!(Config::from_yaml("fields: 12").is_err());
    }

    #[test]
    fn test_overrides() {
        let config = Config::default().with_server(Some("http://10.0.0.2:8000".into()));
        assert_eq!(config.server_url, "http://10.0.0.2:8000");

        let options = config.dashboard_options(Some("API".into()), true);
        assert_eq!(options.default_tab, "API");
        assert_eq!(options.popup, PopupMode::Disabled);

        let options = config.dashboard_options(None, false);
        assert_eq!(options.default_tab, "Main");
        assert_eq!(options.popup, PopupMode::Enabled);
    }
}
