//! Projection of roster + metrics onto the dashboard view
//!
//! The view is rebuilt from its pristine state on every pass, so rendering
//! the same tab against the same data always yields the same view no matter
//! which tab was shown before.

use super::registry::NodeRegistry;
use super::store::MetricStore;
use serde::Serialize;
use std::collections::HashMap;
use vigil_common::constants::{HTTP_STATUS_FIELD, NOT_AVAILABLE, PLACEHOLDER_ICON};
use vigil_common::{classify, reason_phrase, DashboardError, Node, Severity};

/// Whether the UI variant has a per-node status popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupMode {
    Enabled,
    Disabled,
}

impl PopupMode {
    pub fn toggled(self) -> Self {
        match self {
            PopupMode::Enabled => PopupMode::Disabled,
            PopupMode::Disabled => PopupMode::Enabled,
        }
    }
}

/// One labeled aggregate output field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldLabel {
    pub name: String,
    pub text: String,
    pub severity: Option<Severity>,
}

impl FieldLabel {
    fn blank(name: &str) -> Self {
        Self {
            name: name.to_string(),
            text: String::new(),
            severity: None,
        }
    }
}

/// A card in the node grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeCard {
    pub name: String,
    pub icon: String,
    pub info: String,
    pub live: bool,
    pub placeholder: bool,
    pub rwl: String,
    pub tfb: String,
}

impl NodeCard {
    fn from_node(node: &Node) -> Self {
        Self {
            name: node.name.clone(),
            icon: node.icon.clone(),
            info: node.info.clone(),
            live: node.live,
            placeholder: node.is_placeholder(),
            rwl: String::new(),
            tfb: String::new(),
        }
    }

    fn clear_labels(&mut self) {
        self.rwl.clear();
        self.tfb.clear();
    }
}

/// Node cards plus a name -> card index, built once per roster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeGrid {
    cards: Vec<NodeCard>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl NodeGrid {
    /// Build the grid from a display roster (placeholders are not indexed)
    pub fn build(roster: &[Node]) -> Self {
        let mut index = HashMap::new();
        for (i, node) in roster.iter().enumerate() {
            if !node.is_placeholder() {
                index.entry(node.name.clone()).or_insert(i);
            }
        }

        Self {
            cards: roster.iter().map(NodeCard::from_node).collect(),
            index,
        }
    }

    pub fn cards(&self) -> &[NodeCard] {
        &self.cards
    }

    #[cfg(test)]
    pub fn card(&self, name: &str) -> Option<&NodeCard> {
        self.index.get(name).map(|&i| &self.cards[i])
    }

    fn card_mut(&mut self, name: &str) -> Option<&mut NodeCard> {
        match self.index.get(name) {
            Some(&i) => self.cards.get_mut(i),
            None => None,
        }
    }

    fn clear_labels(&mut self) {
        self.cards.iter_mut().for_each(NodeCard::clear_labels);
    }
}

/// Entry in the per-node HTTP status popup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopupEntry {
    pub node: String,
    pub icon: String,
    pub code: i64,
    pub severity: Severity,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Popup {
    pub visible: bool,
    pub entries: Vec<PopupEntry>,
}

/// Everything the dashboard shows for the selected tab
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub tab: Option<String>,
    pub fields: Vec<FieldLabel>,
    pub grid: NodeGrid,
    pub popup: Popup,
}

impl DashboardView {
    pub fn new(grid: NodeGrid) -> Self {
        Self {
            tab: None,
            fields: Vec::new(),
            grid,
            popup: Popup::default(),
        }
    }

    #[cfg(test)]
    pub fn field(&self, name: &str) -> Option<&FieldLabel> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Reconciles the roster and the metrics store into a [`DashboardView`]
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    layout: Vec<String>,
    popup_mode: PopupMode,
}

impl DashboardRenderer {
    pub fn new(layout: Vec<String>, popup_mode: PopupMode) -> Self {
        Self { layout, popup_mode }
    }

    pub fn popup_mode(&self) -> PopupMode {
        self.popup_mode
    }

    pub fn set_popup_mode(&mut self, mode: PopupMode) {
        self.popup_mode = mode;
    }

    /// Render `tab` into `view`.
    ///
    /// Fails with `NotFound` (leaving `view` untouched) when the store has
    /// no such tab.
    pub fn render(
        &self,
        registry: &NodeRegistry,
        store: &MetricStore,
        tab: &str,
        view: &mut DashboardView,
    ) -> Result<(), DashboardError> {
        let metrics = store.metrics_for(tab)?;

        // Configured layout first, then whatever else the backend aggregates
        let mut names: Vec<&str> = self.layout.iter().map(String::as_str).collect();
        for field in metrics.overall.keys() {
            if !names.contains(&field.as_str()) {
                names.push(field.as_str());
            }
        }

        view.tab = Some(tab.to_string());
        view.fields = names.into_iter().map(FieldLabel::blank).collect();
        view.grid.clear_labels();
        view.popup = Popup::default();

        if !metrics.has_data() {
            tracing::debug!("Tab {} has no node data", tab);
            for field in &mut view.fields {
                field.text = NOT_AVAILABLE.to_string();
            }
            for card in view.grid.cards.iter_mut().filter(|c| c.live) {
                card.rwl = format!("RWL: {}", NOT_AVAILABLE);
                card.tfb = format!("TTFB: {}", NOT_AVAILABLE);
            }
            return Ok(());
        }

        for (name, value) in metrics.overall.iter() {
            let Some(field) = view.fields.iter_mut().find(|f| f.name == *name) else {
                continue;
            };
            if name == HTTP_STATUS_FIELD {
                let code = *value as i64;
                field.text = format!("{} {}", code, reason_phrase(code));
                field.severity = Some(classify(code));
            } else {
                field.text = format!("{}ms", value);
            }
        }

        for (name, data) in metrics.nodes.iter() {
            match view.grid.card_mut(name) {
                Some(card) => {
                    card.rwl = format!("RWL: {}ms", data.rwl);
                    card.tfb = format!("TTFB: {}ms", data.tfb);
                }
                None => tracing::debug!("Metrics for {} have no card in the node grid", name),
            }
        }

        if self.popup_mode == PopupMode::Enabled {
            view.popup.visible = true;
            view.popup.entries = metrics
                .nodes
                .iter()
                .map(|(name, data)| PopupEntry {
                    node: name.to_string(),
                    icon: registry
                        .find_by_name(name)
                        .map(|n| n.icon.clone())
                        .unwrap_or_else(|| PLACEHOLDER_ICON.to_string()),
                    code: data.htc,
                    severity: classify(data.htc),
                })
                .collect();
        }

        Ok(())
    }
}
