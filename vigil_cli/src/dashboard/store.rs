//! Metrics payload storage

use vigil_common::{DashboardError, MetricsPayload, TabMetrics};

/// Holds the fetched metrics payload, keyed by tab name
#[derive(Debug, Clone, Default)]
pub struct MetricStore {
    payload: MetricsPayload,
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, payload: MetricsPayload) {
        self.payload = payload;
    }

    /// Tab names in payload order
    pub fn tab_names(&self) -> Vec<String> {
        self.payload.keys().cloned().collect()
    }

    pub fn metrics_for(&self, tab: &str) -> Result<&TabMetrics, DashboardError> {
        self.payload
            .get(tab)
            .ok_or_else(|| DashboardError::tab_not_found(tab))
    }

    /// True when no node reported for `tab`
    pub fn is_empty(&self, tab: &str) -> Result<bool, DashboardError> {
        Ok(!self.metrics_for(tab)?.has_data())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_common::NodeMetrics;

    fn payload() -> MetricsPayload {
        let mut busy = TabMetrics::default();
        busy.overall.insert("rwl".into(), 80.0);
        busy.nodes.insert("fra".into(), NodeMetrics::new(80.0, 20.0, 200));

        let mut quiet = TabMetrics::default();
        quiet.overall.insert("rwl".into(), 50.0);

        [("Zeta".to_string(), quiet), ("Main".to_string(), busy)].into_iter().collect()
    }

    #[test]
    fn test_tab_names_follow_payload_order() {
        let mut store = MetricStore::new();
        store.load(payload());
        assert_eq!(store.tab_names(), vec!["Zeta", "Main"]);
    }

    #[test]
    fn test_is_empty_looks_at_nodes_only() {
        let mut store = MetricStore::new();
        store.load(payload());
        assert!(store.is_empty("Zeta").unwrap());
        assert!(!store.is_empty("Main").unwrap());
    }

    #[test]
    fn test_unknown_tab_is_not_found() {
        let store = MetricStore::new();
        assert!(matches!(
            store.metrics_for("Main"),
            Err(DashboardError::NotFound { .. })
        ));
        assert!(store.is_empty("Main").is_err());
    }
}
