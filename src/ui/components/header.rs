use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Tabs},
    Frame,
};
use strum::IntoEnumIterator;

use crate::app::state::{PanelState, Tab};
use super::super::theme::*;

pub fn render_header(f: &mut Frame, area: Rect, panel: &PanelState) {
    let emotion = if panel.emotion.is_empty() {
        "—".to_string()
    } else {
        panel.emotion.clone()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(" 🎵 ", playing_style()),
            Span::styled("JioSaavn Music Therapy", title_style()),
        ]),
        Line::from(vec![
            Span::styled("    Emotion: ", dim_style()),
            Span::styled(emotion, accent_style()),
        ]),
    ];

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(12)])
        .split(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(true))
        .style(normal_style().bg(BG_ALT));
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(lines), inner);

    let close = Paragraph::new(Line::from(Span::styled("[q] ✕ ", muted_style())));
    f.render_widget(
        close,
        Rect {
            y: cols[1].y + 1,
            height: 1,
            ..cols[1]
        },
    );
}

pub fn render_tabs(f: &mut Frame, area: Rect, panel: &PanelState) {
    let titles: Vec<Line> = Tab::iter()
        .enumerate()
        .map(|(i, tab)| {
            Line::from(vec![
                Span::styled(format!("[{}] ", i + 1), muted_style()),
                Span::raw(tab.to_string()),
            ])
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(panel.active_tab.index())
        .style(dim_style())
        .highlight_style(selected_style())
        .divider(Span::styled(" │ ", muted_style()))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(border_style(false)),
        );
    f.render_widget(tabs, area);
}

pub fn render_footer(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" 🎵 Powered by JioSaavn", dim_style()),
        Span::styled("   🎵 Music Therapy  💚 Mental Wellness", muted_style()),
        Span::styled("   [?] help", muted_style()),
    ]);
    f.render_widget(Paragraph::new(line).style(normal_style().bg(BG_ALT)), area);
}
