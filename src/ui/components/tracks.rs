use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::{
    app::{
        controller::format_duration,
        state::{AppState, PanelState, Tab},
    },
    saavn::Track,
};
use super::super::{theme::*, truncate};

pub fn render_recommendations(f: &mut Frame, area: Rect, app: &AppState, panel: &PanelState) {
    let title = format!(" ✨ Recommended for {} mood  [r] refresh ", panel.emotion);

    // An error banner already explains an empty list
    if panel.recommendations.tracks.is_empty() {
        let msg = if panel.error.is_some() {
            ""
        } else {
            "  🎧 No recommendations available for this emotion."
        };
        let para = Paragraph::new(Line::from(Span::styled(msg, muted_style())))
            .block(make_block(&title, true));
        f.render_widget(para, area);
        return;
    }

    render_track_table(
        f,
        area,
        &title,
        &panel.recommendations.tracks,
        app.selected(Tab::Recommendations),
        true,
    );
}

/// Track table shared by the recommendations and search tabs.
pub fn render_track_table(
    f: &mut Frame,
    area: Rect,
    title: &str,
    tracks: &[Track],
    selected: usize,
    focused: bool,
) {
    let title_width = (area.width as usize).saturating_sub(30).max(10) / 2;

    let rows: Vec<Row> = tracks
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_sel = i == selected && focused;
            let marker = if is_sel {
                "▶".to_string()
            } else {
                format!("{}", i + 1)
            };
            let kind = if track.has_preview() { "♪" } else { "↗" };
            let style = if is_sel { selected_style() } else { normal_style() };
            Row::new(vec![
                Cell::from(marker).style(if is_sel { playing_style() } else { muted_style() }),
                Cell::from(truncate(&track.title, title_width)).style(style),
                Cell::from(truncate(&track.artist, title_width)).style(dim_style()),
                Cell::from(truncate(&track.album, title_width / 2 + 4)).style(muted_style()),
                Cell::from(format_duration(track.duration)).style(muted_style()),
                Cell::from(kind).style(accent_style()),
            ])
            .style(style)
        })
        .collect();

    let header = Row::new(vec![
        Cell::from("#").style(header_style()),
        Cell::from("Title").style(header_style()),
        Cell::from("Artist").style(header_style()),
        Cell::from("Album").style(header_style()),
        Cell::from("Dur").style(header_style()),
        Cell::from(" ").style(header_style()),
    ]);

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Percentage(35),
            Constraint::Percentage(28),
            Constraint::Percentage(22),
            Constraint::Length(6),
            Constraint::Length(2),
        ],
    )
    .header(header)
    .block(make_block(title, focused));
    let table = if focused {
        table.row_highlight_style(selected_style())
    } else {
        table
    };

    // The state scrolls the table so the cursor row stays on screen
    let mut state = TableState::default().with_selected(Some(selected));
    f.render_stateful_widget(table, area, &mut state);
}

pub fn make_block(title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .title(Span::styled(title.to_string(), title_style()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border_style(focused))
        .style(normal_style().bg(BG))
}
