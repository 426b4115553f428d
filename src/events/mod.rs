use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::state::InputMode;

#[derive(Debug, Clone, PartialEq)]
pub enum UserAction {
    Close,
    ToggleHelp,
    NavigateUp,
    NavigateDown,
    NextTab,
    PrevTab,
    SwitchTab(u8),
    Select,
    OpenExternal,
    Refresh,
    OpenSearch,
    EditEmotion,
    Input(char),
    Backspace,
    Submit,
    Cancel,
}

pub fn map_key_to_action(key: KeyEvent, mode: InputMode) -> Option<UserAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UserAction::Close);
    }

    if mode != InputMode::Normal {
        return match key.code {
            KeyCode::Esc => Some(UserAction::Cancel),
            KeyCode::Enter => Some(UserAction::Submit),
            KeyCode::Backspace => Some(UserAction::Backspace),
            KeyCode::Char(c) => Some(UserAction::Input(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UserAction::Close),
        KeyCode::Char('?') => Some(UserAction::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UserAction::NavigateUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UserAction::NavigateDown),
        KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => Some(UserAction::NextTab),
        KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => Some(UserAction::PrevTab),
        KeyCode::Char('1') => Some(UserAction::SwitchTab(1)),
        KeyCode::Char('2') => Some(UserAction::SwitchTab(2)),
        KeyCode::Char('3') => Some(UserAction::SwitchTab(3)),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UserAction::Select),
        KeyCode::Char('o') => Some(UserAction::OpenExternal),
        KeyCode::Char('r') => Some(UserAction::Refresh),
        KeyCode::Char('/') | KeyCode::Char('s') => Some(UserAction::OpenSearch),
        KeyCode::Char('m') => Some(UserAction::EditEmotion),
        _ => None,
    }
}
