//! Interactive dashboard command

use crate::api::{load_snapshot, ApiClient};
use crate::config::Config;
use crate::dashboard::Dashboard;
use crate::tui::{self, TuiApp, TuiEvent};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

/// Fetch everything, then hand the terminal to the TUI until the user quits
pub async fn run(config: Config, tab: Option<String>, no_popup: bool) -> Result<()> {
    let options = config.dashboard_options(tab, no_popup);

    // Tab controls only exist once both fetches have completed
    let (client, snapshot) = super::load(&config).await?;
    let dashboard = Dashboard::new(snapshot, &options)?;
    let mut app = TuiApp::new(dashboard, options, client.base_url().to_string());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_tui_loop(&mut terminal, &mut app, &client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_tui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TuiApp,
    client: &ApiClient,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(100));

    loop {
        // Draw UI
        terminal.draw(|f| tui::draw(f, app))?;

        tick_interval.tick().await;
        app.handle_event(TuiEvent::Tick);

        // Handle keyboard events (non-blocking)
        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_event(TuiEvent::Key(key));
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }

        if app.reload_requested {
            app.reload_requested = false;
            terminal.draw(|f| tui::draw(f, app))?;

            let event = match load_snapshot(client).await {
                Ok(snapshot) => TuiEvent::Reloaded(snapshot),
                Err(e) => TuiEvent::ReloadFailed(e.to_string()),
            };
            app.handle_event(event);
        }
    }
}
