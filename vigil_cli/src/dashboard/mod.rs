//! Dashboard core: roster, metrics store, renderer and tab controller

mod registry;
mod render;
mod store;
mod tabs;

pub use registry::NodeRegistry;
pub use render::{DashboardRenderer, DashboardView, NodeCard, NodeGrid, PopupMode};
pub use store::MetricStore;
pub use tabs::{Selection, TabControl, TabController};

use chrono::{DateTime, Local};
use vigil_common::constants::{DEFAULT_FIELDS, DEFAULT_TAB, MIN_DISPLAY_NODES};
use vigil_common::{DashboardError, MetricsPayload, Node};

/// Result of one fetch cycle
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub nodes: Vec<Node>,
    pub metrics: MetricsPayload,
    pub fetched_at: DateTime<Local>,
}

impl Snapshot {
    pub fn new(nodes: Vec<Node>, metrics: MetricsPayload) -> Self {
        Self {
            nodes,
            metrics,
            fetched_at: Local::now(),
        }
    }
}

/// Presentation knobs, usually derived from the config file
#[derive(Debug, Clone)]
pub struct DashboardOptions {
    pub default_tab: String,
    pub min_display_nodes: usize,
    pub fields: Vec<String>,
    pub popup: PopupMode,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            default_tab: DEFAULT_TAB.to_string(),
            min_display_nodes: MIN_DISPLAY_NODES,
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            popup: PopupMode::Enabled,
        }
    }
}

/// Loaded data plus the view it is projected onto
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub registry: NodeRegistry,
    pub store: MetricStore,
    pub view: DashboardView,
    pub fetched_at: DateTime<Local>,
    renderer: DashboardRenderer,
}

impl DashboardState {
    pub fn new(snapshot: Snapshot, options: &DashboardOptions) -> Self {
        let mut registry = NodeRegistry::new();
        registry.load(snapshot.nodes);

        let mut store = MetricStore::new();
        store.load(snapshot.metrics);

        // Cards exist before any metrics are attached to them
        let grid = NodeGrid::build(&registry.display_roster(options.min_display_nodes));

        Self {
            registry,
            store,
            view: DashboardView::new(grid),
            fetched_at: snapshot.fetched_at,
            renderer: DashboardRenderer::new(options.fields.clone(), options.popup),
        }
    }

    pub fn render(&mut self, tab: &str) -> Result<(), DashboardError> {
        self.renderer
            .render(&self.registry, &self.store, tab, &mut self.view)
    }

    pub fn popup_mode(&self) -> PopupMode {
        self.renderer.popup_mode()
    }
}

/// The whole dashboard: state plus the tab controller driving it
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub controller: TabController,
    pub state: DashboardState,
}

impl Dashboard {
    /// Build the dashboard from a snapshot and render the initial tab
    pub fn new(snapshot: Snapshot, options: &DashboardOptions) -> Result<Self, DashboardError> {
        let mut state = DashboardState::new(snapshot, options);
        let mut controller = TabController::new();
        controller.initialize(&mut state, &options.default_tab)?;
        Ok(Self { controller, state })
    }

    pub fn select(&mut self, tab: &str) -> Result<Selection, DashboardError> {
        self.controller.select(tab, &mut self.state)
    }

    pub fn select_index(&mut self, index: usize) -> Result<Selection, DashboardError> {
        self.controller.select_index(index, &mut self.state)
    }

    pub fn select_next(&mut self) -> Result<Selection, DashboardError> {
        self.controller.select_next(&mut self.state)
    }

    pub fn select_previous(&mut self) -> Result<Selection, DashboardError> {
        self.controller.select_previous(&mut self.state)
    }

    /// Switch UI variant and re-render the active tab
    pub fn toggle_popup(&mut self) -> Result<(), DashboardError> {
        let mode = self.state.renderer.popup_mode().toggled();
        self.state.renderer.set_popup_mode(mode);
        if let Some(tab) = self.controller.active().map(str::to_string) {
            self.state.render(&tab)?;
        }
        Ok(())
    }

    pub fn view(&self) -> &DashboardView {
        &self.state.view
    }

    pub fn tabs(&self) -> &[TabControl] {
        self.controller.controls()
    }

    pub fn active_tab(&self) -> Option<&str> {
        self.controller.active()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_common::{MetricsPayload, NodeMetrics, TabMetrics};

    fn snapshot() -> Snapshot {
        let mut main = TabMetrics::default();
        main.overall.insert("rwl".into(), 40.0);
        main.overall.insert("htc".into(), 200.0);
        main.nodes.insert("fra".into(), NodeMetrics::new(40.0, 10.0, 200));

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
        let payload: MetricsPayload = [
            ("Main".to_string(), main),
            ("Empty".to_string(), TabMetrics::default()),
        ]
        .into_iter()
        .collect();
        Snapshot::new(nodes, payload)
    }

    #[test]
    fn test_initial_render() {
        let dashboard = Dashboard::new(snapshot(), &DashboardOptions::default()).unwrap();

        assert_eq!(dashboard.active_tab(), Some("Main"));
        assert_eq!(dashboard.view().grid.cards().len(), 4);
        assert_eq!(dashboard.view().field("htc").unwrap().text, "200 OK");
        assert_eq!(dashboard.view().grid.card("fra").unwrap().rwl, "RWL: 40ms");
        assert!(dashboard.view().popup.visible);
    }

    #[test]
    fn test_toggle_popup_rerenders() {
        let mut dashboard = Dashboard::new(snapshot(), &DashboardOptions::default()).unwrap();

        dashboard.toggle_popup().unwrap();
        assert_eq!(dashboard.state.popup_mode(), PopupMode::Disabled);
        assert!(!dashboard.view().popup.visible);

        dashboard.toggle_popup().unwrap();
        assert_eq!(dashboard.view().popup.entries.len(), 1);
    }

    #[test]
    fn test_switch_to_empty_tab() {
        let mut dashboard = Dashboard::new(snapshot(), &DashboardOptions::default()).unwrap();

        assert_eq!(dashboard.select("Empty").unwrap(), Selection::Selected);
        assert_eq!(dashboard.view().field("htc").unwrap().text, "N/A");
        assert_eq!(dashboard.view().grid.card("fra").unwrap().tfb, "TTFB: N/A");
        assert_eq!(dashboard.view().grid.card("sjc").unwrap().tfb, "");
    }
}
