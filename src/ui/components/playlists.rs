use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::app::{
    controller::format_duration,
    state::{AppState, PanelState, Tab},
};
use super::{super::theme::*, tracks::make_block};

pub fn render_playlists(f: &mut Frame, area: Rect, app: &AppState, panel: &PanelState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    render_playlist_list(f, chunks[0], app, panel);
    render_playlist_preview(f, chunks[1], app, panel);
}

fn render_playlist_list(f: &mut Frame, area: Rect, app: &AppState, panel: &PanelState) {
    let playlists = &panel.recommendations.playlists;
    if playlists.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled(
            "  No playlists for this emotion.",
            muted_style(),
        )))
        .block(make_block(" 💿 Therapeutic Playlists ", true));
        f.render_widget(para, area);
        return;
    }

    let selected = app.selected(Tab::Playlists);
    let items: Vec<ListItem> = playlists
        .iter()
        .enumerate()
        .map(|(i, pl)| {
            let is_sel = i == selected;
            let icon = if is_sel { "▶" } else { " " };
            let lines = vec![
                Line::from(vec![
                    Span::styled(format!("{icon} "), if is_sel { playing_style() } else { muted_style() }),
                    Span::styled(pl.name.clone(), if is_sel { selected_style() } else { normal_style() }),
                ]),
                Line::from(Span::styled(
                    format!("    {} tracks", pl.tracks.len()),
                    muted_style(),
                )),
            ];
            if is_sel {
                ListItem::new(lines).style(selected_style())
            } else {
                ListItem::new(lines)
            }
        })
        .collect();

    let list = List::new(items).block(make_block(
        &format!(" 💿 Therapeutic Playlists ({})  [Enter] open ", playlists.len()),
        true,
    ));
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn render_playlist_preview(f: &mut Frame, area: Rect, app: &AppState, panel: &PanelState) {
    let Some(playlist) = panel
        .recommendations
        .playlists
        .get(app.selected(Tab::Playlists))
    else {
        f.render_widget(make_block(" 🎵 Tracks ", false), area);
        return;
    };

    let mut lines = Vec::new();
    if !playlist.description.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {}", playlist.description),
            dim_style(),
        )));
        lines.push(Line::from(Span::raw("")));
    }
    for (i, track) in playlist.tracks.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:>3}. ", i + 1), muted_style()),
            Span::styled(track.title.clone(), normal_style()),
            Span::styled(" — ", muted_style()),
            Span::styled(track.artist.clone(), dim_style()),
            Span::styled(format!("  {}", format_duration(track.duration)), muted_style()),
        ]));
    }
    if playlist.tracks.is_empty() {
        lines.push(Line::from(Span::styled(
            " Track list unavailable, open in JioSaavn to listen.",
            muted_style(),
        )));
    }

    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(make_block(&format!(" 🎵 {} ", playlist.name), false));
    f.render_widget(para, area);
}
