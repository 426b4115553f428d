use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::super::{centered_rect, theme::*};

pub fn render_help(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(" ❓ Keybindings ", title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(border_style(true))
        .style(normal_style().bg(BG_ALT));

    let inner = block.inner(popup_area);
    f.render_widget(block, popup_area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .margin(1)
        .split(inner);

    let left = vec![
        section("Navigation"),
        Line::from(Span::raw("")),
        key_line("↑ / k", "Move up"),
        key_line("↓ / j", "Move down"),
        key_line("Tab / →", "Next tab"),
        key_line("S-Tab / ←", "Previous tab"),
        key_line("1-3", "Jump to tab"),
        Line::from(Span::raw("")),
        section("Listening"),
        Line::from(Span::raw("")),
        key_line("Enter", "Play preview / open"),
        key_line("o", "Open in JioSaavn"),
    ];

    let right = vec![
        section("Panel"),
        Line::from(Span::raw("")),
        key_line("r", "Refresh recommendations"),
        key_line("/ or s", "Search"),
        key_line("m", "Change emotion"),
        key_line("Esc", "Leave input / close"),
        Line::from(Span::raw("")),
        key_line("?", "Toggle this help"),
        key_line("q", "Close"),
    ];

    f.render_widget(Paragraph::new(left), cols[0]);
    f.render_widget(Paragraph::new(right), cols[1]);
}

fn section(name: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {name}"),
        playing_style().add_modifier(Modifier::BOLD),
    ))
}

fn key_line(key: &str, desc: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled("  ", muted_style()),
        Span::styled(format!("{key:<10}"), accent_style()),
        Span::styled(desc.to_string(), normal_style()),
    ])
}
