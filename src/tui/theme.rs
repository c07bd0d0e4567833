use ratatui::style::{Color, Modifier, Style};

pub const ACCENT_COLOR: Color = Color::Cyan;
pub const MUTED_COLOR: Color = Color::DarkGray;

pub fn title_style() -> Style {
    Style::new().fg(ACCENT_COLOR).add_modifier(Modifier::BOLD)
}

pub fn status_normal_style() -> Style {
    Style::new().fg(Color::White)
}

pub fn hint_style() -> Style {
    Style::new().fg(MUTED_COLOR).add_modifier(Modifier::DIM)
}
