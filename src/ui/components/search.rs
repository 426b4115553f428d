use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::app::state::{AppState, InputMode, PanelState, Tab};
use super::{
    super::{spinner, theme::*},
    tracks::{make_block, render_track_table},
};

pub fn render_search(f: &mut Frame, area: Rect, app: &AppState, panel: &PanelState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search input
            Constraint::Min(0),    // results
        ])
        .split(area);

    // ── Search input box ──────────────────────────────────────────────────
    let input_focused = app.input_mode == InputMode::Search;
    let cursor = if input_focused && (app.tick / 5) % 2 == 0 { "│" } else { "" };
    let input_block = Block::default()
        .title(Span::styled(" 🔍 Search songs, artists, or albums ", title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(input_focused))
        .style(normal_style().bg(BG_ALT));

    let trailing = if panel.is_searching {
        Span::styled(format!("  {} searching", spinner(app.tick)), playing_style())
    } else {
        Span::raw("")
    };
    let input_text = Paragraph::new(Line::from(vec![
        Span::styled(" ", muted_style()),
        Span::styled(panel.search_query.clone(), accent_style()),
        Span::styled(cursor, playing_style()),
        trailing,
    ]))
    .block(input_block);
    f.render_widget(input_text, chunks[0]);

    // ── Results ───────────────────────────────────────────────────────────
    let title = format!(" Search Results for \"{}\" ", panel.search_query);

    if panel.is_searching || panel.search_results.is_empty() {
        let placeholder = if panel.is_searching {
            "  Searching..."
        } else if panel.search_query.trim().is_empty() {
            "  Press [/] to search, type a query, then Enter..."
        } else {
            "  No results found. Try a different search term."
        };
        let para = Paragraph::new(Line::from(Span::styled(placeholder, muted_style())))
            .block(make_block(&title, false));
        f.render_widget(para, chunks[1]);
        return;
    }

    render_track_table(
        f,
        chunks[1],
        &title,
        &panel.search_results,
        app.selected(Tab::Search),
        !input_focused,
    );
}
