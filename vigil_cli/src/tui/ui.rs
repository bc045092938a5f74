//! TUI rendering functions

use super::app::TuiApp;
use crate::dashboard::{DashboardView, NodeCard};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use vigil_common::Severity;

/// Cards per row in the node grid
const CARDS_PER_ROW: usize = 4;

/// Height of one node card including borders
const CARD_HEIGHT: u16 = 5;

/// Draw the TUI
pub fn draw(frame: &mut Frame, app: &TuiApp) {
    let view = app.dashboard.view();
    let popup_height = if view.popup.visible { 3 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),            // Title bar
            Constraint::Length(3),            // Tabs
            Constraint::Length(2),            // Aggregate fields
            Constraint::Min(CARD_HEIGHT),     // Node grid
            Constraint::Length(popup_height), // Status popup
            Constraint::Length(1),            // Footer
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0]);
    draw_tabs(frame, app, chunks[1]);
    draw_fields(frame, view, chunks[2]);
    draw_node_grid(frame, view, chunks[3]);
    if view.popup.visible {
        draw_popup(frame, view, chunks[4]);
    }
    draw_footer(frame, app, chunks[5]);
}

fn draw_title_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let state = &app.dashboard.state;
    let line = Line::from(vec![
        Span::styled(" VIGIL ", Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(" "),
        Span::styled(&app.server_url, Style::default().fg(Color::White)),
        Span::styled(
            format!(
                "  {} node(s), {} active  fetched {}",
                state.registry.len(),
                state.registry.live_count(),
                state.fetched_at.format("%H:%M:%S")
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_tabs(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let tabs = app.dashboard.tabs();
    let titles: Vec<Line> = tabs
        .iter()
        .enumerate()
        .map(|(i, tab)| Line::from(format!("{} {}", i + 1, tab.name)))
        .collect();

    let widget = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .select(app.dashboard.controller.active_index());

    frame.render_widget(widget, area);
}

fn draw_fields(frame: &mut Frame, view: &DashboardView, area: Rect) {
    let mut spans = Vec::new();
    for field in &view.fields {
        spans.push(Span::styled(
            format!(" {} ", field.name.to_uppercase()),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::styled(
            field.text.clone(),
            severity_style(field.severity).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled("  │", Style::default().fg(Color::DarkGray)));
    }
    spans.pop();

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_node_grid(frame: &mut Frame, view: &DashboardView, area: Rect) {
    let cards = view.grid.cards();
    let rows: Vec<&[NodeCard]> = cards.chunks(CARDS_PER_ROW).collect();

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            rows.iter()
                .map(|_| Constraint::Length(CARD_HEIGHT))
                .chain(std::iter::once(Constraint::Min(0))),
        )
        .split(area);

    for (row, row_area) in rows.iter().zip(row_areas.iter()) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints((0..CARDS_PER_ROW).map(|_| Constraint::Ratio(1, CARDS_PER_ROW as u32)))
            .split(*row_area);

        for (card, column) in row.iter().zip(columns.iter()) {
            draw_card(frame, card, *column);
        }
    }
}

fn draw_card(frame: &mut Frame, card: &NodeCard, area: Rect) {
    if card.placeholder {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(Line::from(Span::styled(
            card.icon.as_str(),
            Style::default().fg(Color::DarkGray),
        )))
        .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let (border, text) = if card.live {
        (Style::default().fg(Color::Gray), Style::default().fg(Color::White))
    } else {
        (Style::default().fg(Color::DarkGray), Style::default().fg(Color::DarkGray))
    };

    let mut title = format!(" {} {} ", card.icon, card.name);
    if !card.live {
        title.push_str("(down) ");
    }

    let lines = vec![
        Line::from(Span::styled(card.info.as_str(), Style::default().fg(Color::DarkGray))),
        Line::from(Span::styled(card.tfb.as_str(), text)),
        Line::from(Span::styled(card.rwl.as_str(), text)),
    ];

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_popup(frame: &mut Frame, view: &DashboardView, area: Rect) {
    let mut spans = Vec::new();
    for entry in &view.popup.entries {
        spans.push(Span::raw(format!(" {} ", entry.icon)));
        spans.push(Span::styled(
            entry.code.to_string(),
            severity_style(Some(entry.severity)).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(" "));
    }

    let block = Block::default()
        .title(" HTTP Status ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_footer(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let line = match &app.status_message {
        Some(message) => Line::from(Span::styled(message.as_str(), Style::default().fg(Color::Red))),
        None => Line::from(vec![
            Span::styled("←/→", Style::default().fg(Color::Cyan)),
            Span::styled(" Tabs  ", Style::default().fg(Color::DarkGray)),
            Span::styled("1-9", Style::default().fg(Color::Cyan)),
            Span::styled(" Jump  ", Style::default().fg(Color::DarkGray)),
            Span::styled("p", Style::default().fg(Color::Cyan)),
            Span::styled(" Status popup  ", Style::default().fg(Color::DarkGray)),
            Span::styled("r", Style::default().fg(Color::Cyan)),
            Span::styled(" Reload  ", Style::default().fg(Color::DarkGray)),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
        ]),
    };
    frame.render_widget(Paragraph::new(line), area);
}

/// Get style for an HTTP status severity
fn severity_style(severity: Option<Severity>) -> Style {
    match severity {
        Some(Severity::Ok) => Style::default().fg(Color::Green),
        Some(Severity::Info) => Style::default().fg(Color::Cyan),
        Some(Severity::Bad) => Style::default().fg(Color::Red),
        None => Style::default().fg(Color::White),
    }
}
