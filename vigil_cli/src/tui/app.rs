//! TUI application state and event handling

use crate::dashboard::{Dashboard, DashboardOptions, Selection, Snapshot};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use vigil_common::DashboardError;

/// Events that can be sent to the TUI
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Key event from terminal
    Key(KeyEvent),
    /// A reload finished with fresh data
    Reloaded(Snapshot),
    /// A reload failed
    ReloadFailed(String),
    /// Tick for periodic redraws
    Tick,
}

/// TUI application state
pub struct TuiApp {
    pub dashboard: Dashboard,
    pub options: DashboardOptions,
    pub server_url: String,
    pub status_message: Option<String>,
    pub reload_requested: bool,
    pub should_quit: bool,
}

impl TuiApp {
    pub fn new(dashboard: Dashboard, options: DashboardOptions, server_url: String) -> Self {
        Self {
            dashboard,
            options,
            server_url,
            status_message: None,
            reload_requested: false,
            should_quit: false,
        }
    }

    /// Rebuild the whole dashboard from a fresh snapshot, staying on the
    /// current tab when it still exists
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) {
        let mut options = self.options.clone();
        options.popup = self.dashboard.state.popup_mode();
        if let Some(active) = self.dashboard.active_tab() {
            if snapshot.metrics.contains_key(active) {
                options.default_tab = active.to_string();
            }
        }

        match Dashboard::new(snapshot, &options) {
            Ok(dashboard) => {
                self.dashboard = dashboard;
                self.status_message = None;
            }
            Err(e) => self.report(e),
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) {
        let result = match (key.code, key.modifiers) {
            // Quit
            (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('q'), _) | (KeyCode::Esc, _) => {
                self.should_quit = true;
                Ok(())
            }
            // Tab navigation
            (KeyCode::Right | KeyCode::Tab | KeyCode::Char('l'), _) => {
                self.dashboard.select_next().map(drop)
            }
            (KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h'), _) => {
                self.dashboard.select_previous().map(drop)
            }
            (KeyCode::Char(c @ '1'..='9'), _) => {
                let index = c as usize - '1' as usize;
                self.dashboard.select_index(index).map(|outcome| {
                    if outcome == Selection::Ignored {
                        tracing::debug!("No tab at position {}", index + 1);
                    }
                })
            }
            // Variant and data
            (KeyCode::Char('p'), _) => self.dashboard.toggle_popup(),
            (KeyCode::Char('r'), _) => {
                self.reload_requested = true;
                self.status_message = Some("Reloading...".to_string());
                Ok(())
            }
            _ => Ok(()),
        };

        if let Err(e) = result {
            self.report(e);
        }
    }

    /// Handle TUI event
    pub fn handle_event(&mut self, event: TuiEvent) {
        match event {
            TuiEvent::Key(key) => self.handle_key(key),
            TuiEvent::Reloaded(snapshot) => self.replace_snapshot(snapshot),
            TuiEvent::ReloadFailed(message) => {
                tracing::warn!("Reload failed: {}", message);
                self.status_message = Some(format!("Reload failed: {}", message));
            }
            TuiEvent::Tick => {} // Just triggers a redraw
        }
    }

    fn report(&mut self, err: DashboardError) {
        tracing::error!("Render failed: {}", err);
        self.status_message = Some(err.to_string());
    }
}
