use crate::saavn::{Playlist, Track};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, strum_macros::Display, strum_macros::EnumIter,
)]
pub enum Tab {
    #[default]
    #[strum(to_string = "✨ Recommendations")]
    Recommendations,
    #[strum(to_string = "💿 Playlists")]
    Playlists,
    #[strum(to_string = "🔍 Search")]
    Search,
}

impl Tab {
    pub fn index(self) -> usize {
        match self {
            Tab::Recommendations => 0,
            Tab::Playlists => 1,
            Tab::Search => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Tab::Recommendations),
            2 => Some(Tab::Playlists),
            3 => Some(Tab::Search),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Tab::Recommendations => Tab::Playlists,
            Tab::Playlists => Tab::Search,
            Tab::Search => Tab::Recommendations,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Tab::Recommendations => Tab::Search,
            Tab::Playlists => Tab::Recommendations,
            Tab::Search => Tab::Playlists,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    pub tracks: Vec<Track>,
    pub playlists: Vec<Playlist>,
}

/// Everything the panel controller owns. Mutated only through
/// [`PanelController`](super::controller::PanelController).
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    pub emotion: String,
    pub is_visible: bool,
    pub active_tab: Tab,
    pub is_loading: bool,
    pub error: Option<String>,
    pub recommendations: Recommendations,
    pub search_query: String,
    pub search_results: Vec<Track>,
    pub is_searching: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    Emotion,
}

#[derive(Debug, Clone, Default)]
pub struct Notification {
    pub message: String,
    pub remaining_ticks: u8,
    pub is_error: bool,
}

impl Notification {
    pub fn info(msg: impl Into<String>) -> Self {
        Notification { message: msg.into(), remaining_ticks: 30, is_error: false }
    }
    pub fn error(msg: impl Into<String>) -> Self {
        Notification { message: msg.into(), remaining_ticks: 40, is_error: true }
    }
}

/// View-only state of the terminal shell; the panel data lives in
/// [`PanelState`].
#[derive(Debug, Default)]
pub struct AppState {
    pub input_mode: InputMode,
    pub emotion_draft: String,
    /// Cursor per tab, indexed by [`Tab::index`].
    pub selected: [usize; 3],
    pub notification: Option<Notification>,
    pub show_help: bool,
    pub should_quit: bool,
    pub tick: u64,
}

impl AppState {
    pub fn selected(&self, tab: Tab) -> usize {
        self.selected[tab.index()]
    }

    pub fn move_selection(&mut self, tab: Tab, len: usize, down: bool) {
        let cur = &mut self.selected[tab.index()];
        if down {
            if *cur + 1 < len {
                *cur += 1;
            }
        } else {
            *cur = cur.saturating_sub(1);
        }
    }

    /// Keeps cursors inside their lists after results are replaced.
    pub fn clamp_selection(&mut self, tab: Tab, len: usize) {
        let cur = &mut self.selected[tab.index()];
        *cur = (*cur).min(len.saturating_sub(1));
    }

    pub fn set_notification(&mut self, n: Notification) {
        self.notification = Some(n);
    }

    pub fn tick_notification(&mut self) {
        if let Some(ref mut n) = self.notification {
            if n.remaining_ticks > 0 {
                n.remaining_ticks -= 1;
            } else {
                self.notification = None;
            }
        }
    }
}
