//! Tab bar state and selection

use super::DashboardState;
use serde::Serialize;
use vigil_common::DashboardError;

/// A selectable tab in the navigation bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabControl {
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControllerState {
    Uninitialized,
    Ready,
}

/// Outcome of a selection request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The tab is now active and has been rendered
    Selected,
    /// Unknown tab (or controller not ready); nothing changed
    Ignored,
}

/// Owns the tab controls and the active tab
#[derive(Debug, Clone)]
pub struct TabController {
    controls: Vec<TabControl>,
    state: ControllerState,
}

impl TabController {
    pub fn new() -> Self {
        Self {
            controls: Vec::new(),
            state: ControllerState::Uninitialized,
        }
    }

    /// Build one control per tab in store order and select the default tab.
    ///
    /// Falls back to the first tab when `default_tab` is not in the payload.
    pub fn initialize(
        &mut self,
        state: &mut DashboardState,
        default_tab: &str,
    ) -> Result<(), DashboardError> {
        self.controls = state
            .store
            .tab_names()
            .into_iter()
            .map(|name| TabControl {
                name,
                active: false,
            })
            .collect();
        self.state = ControllerState::Ready;

        let initial = if self.position(default_tab).is_some() {
            Some(default_tab.to_string())
        } else {
            self.controls.first().map(|c| c.name.clone())
        };

        match initial {
            Some(tab) => {
                if tab != default_tab {
                    tracing::warn!("Default tab {} not in payload, showing {}", default_tab, tab);
                }
                self.select(&tab, state)?;
            }
            None => tracing::warn!("Metrics payload has no tabs"),
        }

        Ok(())
    }

    /// Activate `tab` and render it. Unknown tabs are ignored.
    pub fn select(
        &mut self,
        tab: &str,
        state: &mut DashboardState,
    ) -> Result<Selection, DashboardError> {
        if !self.is_ready() {
            return Ok(Selection::Ignored);
        }
        let Some(index) = self.position(tab) else {
            tracing::debug!("Ignoring selection of unknown tab {}", tab);
            return Ok(Selection::Ignored);
        };

        state.render(tab)?;
        for (i, control) in self.controls.iter_mut().enumerate() {
            control.active = i == index;
        }
        Ok(Selection::Selected)
    }

    pub fn select_index(
        &mut self,
        index: usize,
        state: &mut DashboardState,
    ) -> Result<Selection, DashboardError> {
        match self.controls.get(index) {
            Some(control) => {
                let name = control.name.clone();
                self.select(&name, state)
            }
            None => Ok(Selection::Ignored),
        }
    }

    pub fn select_next(&mut self, state: &mut DashboardState) -> Result<Selection, DashboardError> {
        self.step(1, state)
    }

    pub fn select_previous(&mut self, state: &mut DashboardState) -> Result<Selection, DashboardError> {
        self.step(self.controls.len().saturating_sub(1), state)
    }

    fn step(&mut self, offset: usize, state: &mut DashboardState) -> Result<Selection, DashboardError> {
        let len = self.controls.len();
        if len == 0 {
            return Ok(Selection::Ignored);
        }
        let current = self.active_index().unwrap_or(0);
        self.select_index((current + offset) % len, state)
    }

    pub fn controls(&self) -> &[TabControl] {
        &self.controls
    }

    pub fn active(&self) -> Option<&str> {
        self.controls
            .iter()
            .find(|c| c.active)
            .map(|c| c.name.as_str())
    }

    pub fn active_index(&self) -> Option<usize> {
        self.controls.iter().position(|c| c.active)
    }

    pub fn is_ready(&self) -> bool {
        self.state == ControllerState::Ready
    }

    fn position(&self, tab: &str) -> Option<usize> {
        self.controls.iter().position(|c| c.name == tab)
    }
}

impl Default for TabController {
    fn default() -> Self {
        Self::new()
    }
}
