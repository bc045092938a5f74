//! One-shot rendering of a single tab

use crate::config::Config;
use crate::dashboard::{Dashboard, DashboardView, Selection, TabControl};
use anyhow::Result;
use console::{style, StyledObject};
use serde::Serialize;
use vigil_common::Severity;

/// JSON shape printed by `vigil show --json`
#[derive(Serialize)]
struct ShowOutput<'a> {
    tabs: &'a [TabControl],
    view: &'a DashboardView,
}

/// Fetch, render the requested tab and print it
pub async fn run(config: Config, tab: Option<String>, json: bool, no_popup: bool) -> Result<()> {
    let options = config.dashboard_options(None, no_popup);

    let (_, snapshot) = if json {
        super::load(&config).await?
    } else {
        let spinner = cliclack::spinner();
        spinner.start(format!("Fetching metrics from {}...", config.server_url));
        match super::load(&config).await {
            Ok(loaded) => {
                spinner.stop("Metrics loaded");
                loaded
            }
            Err(e) => {
                spinner.stop("Fetch failed");
                return Err(e);
            }
        }
    };

    let mut dashboard = Dashboard::new(snapshot, &options)?;
    if let Some(tab) = &tab {
        select_tab(&mut dashboard, tab)?;
    }

    if json {
        let output = ShowOutput {
            tabs: dashboard.tabs(),
            view: dashboard.view(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", render_text(&dashboard));
    }

    Ok(())
}

/// Switch to an explicitly requested tab, failing if the backend has no such tab
fn select_tab(dashboard: &mut Dashboard, tab: &str) -> Result<()> {
    if dashboard.select(tab)? == Selection::Ignored {
        let available: Vec<&str> = dashboard.tabs().iter().map(|t| t.name.as_str()).collect();
        anyhow::bail!("Unknown tab: {} (available: {})", tab, available.join(", "));
    }
    Ok(())
}

/// Plain-text rendering of the dashboard
fn render_text(dashboard: &Dashboard) -> String {
    let view = dashboard.view();
    let mut out = String::new();

    let tabs: Vec<String> = dashboard
        .tabs()
        .iter()
        .map(|t| {
            if t.active {
                style(format!("[{}]", t.name)).cyan().bold().to_string()
            } else {
                style(format!(" {} ", t.name)).dim().to_string()
            }
        })
        .collect();
    out.push_str(&tabs.join(" "));
    out.push_str("\n\n");

    for field in &view.fields {
        out.push_str(&format!(
            "  {}{}\n",
            style(format!("{:<6}", field.name.to_uppercase())).dim(),
            severity_styled(&field.text, field.severity)
        ));
    }

    out.push_str(&format!("\n{}\n", style("Nodes").bold()));
    for card in view.grid.cards() {
        if card.placeholder {
            out.push_str(&format!("  {}\n", style(&card.icon).dim()));
            continue;
        }

        let line = format!(
            "  {} {:<12} {:<20} {:<14} {}",
            card.icon, card.name, card.info, card.tfb, card.rwl
        );
        if card.live {
            out.push_str(line.trim_end());
        } else {
            out.push_str(&format!("{} {}", style(line.trim_end()).dim(), style("(down)").red()));
        }
        out.push('\n');
    }

    if view.popup.visible {
        out.push_str(&format!("\n{}\n ", style("HTTP status").bold()));
        for entry in &view.popup.entries {
            out.push_str(&format!(
                " {} {}",
                entry.icon,
                severity_styled(&entry.code.to_string(), Some(entry.severity))
            ));
        }
        out.push('\n');
    }

    out
}

fn severity_styled(text: &str, severity: Option<Severity>) -> StyledObject<&str> {
    match severity {
        Some(Severity::Ok) => style(text).green(),
        Some(Severity::Info) => style(text).cyan(),
        Some(Severity::Bad) => style(text).red(),
        None => style(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{DashboardOptions, Snapshot};
    use vigil_common::{MetricsPayload, Node, NodeMetrics, TabMetrics};

    fn dashboard() -> Dashboard {
        let mut main = TabMetrics::default();
        main.overall.insert("rwl".into(), 110.0);
        main.overall.insert("htc".into(), 301.0);
        main.nodes.insert("fra".into(), NodeMetrics::new(110.0, 38.0, 301));

        let payload: MetricsPayload = [
            ("Main".to_string(), main),
            ("API".to_string(), TabMetrics::default()),
        ]
        .into_iter()
        .collect();
        let nodes = vec![
            Node {
                name: "fra".into(),
                icon: "F".into(),
                info: "Frankfurt".into(),
                live: true,
            },
            Node {
                name: "sjc".into(),
                icon: "S".into(),
                info: "San Jose".into(),
                live: false,
            },
        ];
        Dashboard::new(Snapshot::new(nodes, payload), &DashboardOptions::default()).unwrap()
    }

    #[test]
    fn test_render_text() {
        console::set_colors_enabled(false);
        let text = render_text(&dashboard());

        assert!(text.starts_with("[Main]  API "));
        assert!(text.contains("HTC   301 Moved Permanently"));
        assert!(text.contains("RWL   110ms"));
        assert!(text.contains("F fra"));
        assert!(text.contains("TTFB: 38ms"));
        assert!(text.contains("sjc"));
        assert!(text.contains("(down)"));
        assert!(text.contains("HTTP status"));
        assert!(text.contains("F 301"));
    }

    #[test]
    fn test_select_tab() {
        let mut dashboard = dashboard();
        select_tab(&mut dashboard, "API").unwrap();
        assert_eq!(dashboard.active_tab(), Some("API"));
        assert_eq!(dashboard.view().tab.as_deref(), Some("API"));

        let err = select_tab(&mut dashboard, "Ghost").unwrap_err();
        assert_eq!(err.to_string(), "Unknown tab: Ghost (available: Main, API)");
        assert_eq!(dashboard.active_tab(), Some("API"));
    }

    #[test]
    fn test_json_output_shape() {
        let dashboard = dashboard();
        let output = ShowOutput {
            tabs: dashboard.tabs(),
            view: dashboard.view(),
        };
        let value = serde_json::to_value(&output).unwrap();

        assert_eq!(value["tabs"][0]["name"], "Main");
        assert_eq!(value["tabs"][0]["active"], true);
        assert_eq!(value["view"]["tab"], "Main");
        assert_eq!(value["view"]["popup"]["entries"][0]["severity"], "info");
        assert_eq!(value["view"]["grid"]["cards"].as_array().unwrap().len(), 4);
    }
}
