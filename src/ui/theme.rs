use ratatui::style::{Color, Modifier, Style};

// ─── Color Palette ───────────────────────────────────────────────────────────
pub const BG:          Color = Color::Rgb(12,  17,  15);
pub const BG_ALT:      Color = Color::Rgb(20,  28,  25);
pub const SURFACE_SEL: Color = Color::Rgb(24,  58,  45);

pub const PRIMARY:     Color = Color::Rgb(22,  163, 74);  // saavn green
pub const ACCENT:      Color = Color::Rgb(52,  211, 153); // emerald
pub const TEAL:        Color = Color::Rgb(45,  212, 191);

pub const TEXT:        Color = Color::Rgb(225, 232, 228);
pub const TEXT_DIM:    Color = Color::Rgb(140, 155, 148);
pub const TEXT_MUTED:  Color = Color::Rgb(85,  100, 94);

pub const BORDER:      Color = Color::Rgb(40,  60,  52);
pub const BORDER_FOCUSED: Color = PRIMARY;

pub const ERROR:       Color = Color::Rgb(248, 113, 113);

// ─── Styles ──────────────────────────────────────────────────────────────────
pub fn title_style() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn accent_style() -> Style {
    Style::default().fg(ACCENT)
}

pub fn selected_style() -> Style {
    Style::default()
        .bg(SURFACE_SEL)
        .fg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn muted_style() -> Style {
    Style::default().fg(TEXT_MUTED)
}

pub fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(BORDER_FOCUSED)
    } else {
        Style::default().fg(BORDER)
    }
}

pub fn playing_style() -> Style {
    Style::default().fg(TEAL).add_modifier(Modifier::BOLD)
}

pub fn error_style() -> Style {
    Style::default().fg(ERROR).add_modifier(Modifier::BOLD)
}

pub fn header_style() -> Style {
    Style::default()
        .fg(BG)
        .bg(PRIMARY)
        .add_modifier(Modifier::BOLD)
}
