//! List the tabs offered by the backend

use crate::config::Config;
use crate::dashboard::MetricStore;
use anyhow::Result;

/// Print tab names in payload order
pub async fn run(config: Config) -> Result<()> {
    let (_, snapshot) = super::load(&config).await?;

    let mut store = MetricStore::new();
    store.load(snapshot.metrics);

    let lines = format_tabs(&store, &config.default_tab)?;
    if lines.is_empty() {
        println!("The backend reported no tabs.");
        return Ok(());
    }
    for line in lines {
        println!("{}", line);
    }

    Ok(())
}

fn format_tabs(store: &MetricStore, default_tab: &str) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    for (i, name) in store.tab_names().iter().enumerate() {
        let marker = if name == default_tab { '*' } else { ' ' };
        let note = if store.is_empty(name)? { "  (no data)" } else { "" };
        lines.push(format!("{} {:>2}. {}{}", marker, i + 1, name, note));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_common::{MetricsPayload, NodeMetrics, TabMetrics};

    #[test]
    fn test_format_tabs() {
        let mut main = TabMetrics::default();
        main.nodes.insert("fra".into(), NodeMetrics::new(1.0, 1.0, 200));

        let payload: MetricsPayload = [
            ("Zeta".to_string(), TabMetrics::default()),
            ("Main".to_string(), main),
        ]
        .into_iter()
        .collect();
        let mut store = MetricStore::new();
        store.load(payload);

        assert_eq!(
            format_tabs(&store, "Main").unwrap(),
            vec!["   1. Zeta  (no data)", "*  2. Main"]
        );
    }
}
