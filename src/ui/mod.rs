pub mod components;
pub mod theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthChar;

use crate::app::state::{AppState, InputMode, PanelState, Tab};
use self::theme::*;
use self::components::{
    header::{render_footer, render_header, render_tabs},
    help::render_help,
    playlists::render_playlists,
    search::render_search,
    tracks::render_recommendations,
};

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Root render function, called every frame
pub fn render(f: &mut Frame, app: &AppState, panel: &PanelState) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(3), // tabs
            Constraint::Min(0),    // content
            Constraint::Length(1), // footer
        ])
        .split(size);

    render_header(f, chunks[0], panel);
    render_tabs(f, chunks[1], panel);

    // ── Error banner sits above whatever the tab shows ───────────────────
    let content = if let Some(ref error) = panel.error {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(chunks[2]);
        render_error(f, parts[0], error);
        parts[1]
    } else {
        chunks[2]
    };

    match panel.active_tab {
        Tab::Search if panel.is_loading => {
            let parts = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(0)])
                .split(content);
            f.render_widget(Paragraph::new(loading_line(app)), parts[0]);
            render_search(f, parts[1], app, panel);
        }
        Tab::Search => render_search(f, content, app, panel),
        _ if panel.is_loading => render_loading(f, content, app),
        Tab::Recommendations => render_recommendations(f, content, app, panel),
        Tab::Playlists => render_playlists(f, content, app, panel),
    }

    render_footer(f, chunks[3]);

    // ── Overlays ──────────────────────────────────────────────────────────
    if app.input_mode == InputMode::Emotion {
        render_emotion_prompt(f, size, app);
    }

    if app.show_help {
        render_help(f, size);
    }

    if let Some(ref notif) = app.notification {
        render_notification(f, size, notif.is_error, &notif.message);
    }
}

pub fn spinner(tick: u64) -> &'static str {
    SPINNER[(tick as usize) % SPINNER.len()]
}

/// Cuts `s` to at most `max` terminal columns, marking the cut with `…`.
pub fn truncate(s: &str, max: usize) -> String {
    let width: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > max {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

fn render_error(f: &mut Frame, area: Rect, message: &str) {
    let para = Paragraph::new(Line::from(vec![
        Span::styled(" ⚠ ", error_style()),
        Span::styled(message.to_string(), error_style()),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(error_style()),
    );
    f.render_widget(para, area);
}

fn render_loading(f: &mut Frame, area: Rect, app: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(false))
        .style(normal_style().bg(BG));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let middle = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner)[1];

    f.render_widget(
        Paragraph::new(loading_line(app)).alignment(Alignment::Center),
        middle,
    );
}

fn loading_line(app: &AppState) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{} ", spinner(app.tick)), playing_style()),
        Span::styled("Loading music recommendations...", dim_style()),
    ])
}

fn render_emotion_prompt(f: &mut Frame, area: Rect, app: &AppState) {
    let popup = centered_rect(50, 20, area);
    f.render_widget(Clear, popup);

    let cursor = if (app.tick / 5) % 2 == 0 { "│" } else { " " };
    let block = Block::default()
        .title(Span::styled(" 💭 How are you feeling? ", title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(border_style(true))
        .style(normal_style().bg(BG_ALT));

    let lines = vec![
        Line::from(vec![
            Span::styled(" Emotion: ", dim_style()),
            Span::styled(app.emotion_draft.clone(), accent_style()),
            Span::styled(cursor, playing_style()),
        ]),
        Line::from(Span::raw("")),
        Line::from(Span::styled(
            " e.g. happy, sad, calm, stressed · Enter to apply, Esc to cancel",
            muted_style(),
        )),
    ];

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}

fn render_notification(f: &mut Frame, area: Rect, is_error: bool, message: &str) {
    let toast_width = (message.chars().count().min(60) as u16 + 6).min(area.width);
    let toast_area = Rect {
        x: area.width.saturating_sub(toast_width + 2),
        y: area.height.saturating_sub(5),
        width: toast_width,
        height: 3u16.min(area.height),
    };

    f.render_widget(Clear, toast_area);

    let style = if is_error { error_style() } else { playing_style() };
    let icon = if is_error { "✖ " } else { "✔ " };

    let para = Paragraph::new(Line::from(vec![
        Span::styled(icon, style),
        Span::styled(truncate(message, 60), style),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style),
    )
    .alignment(Alignment::Left);

    f.render_widget(para, toast_area);
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
