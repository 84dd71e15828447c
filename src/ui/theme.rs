//! Dropdown color theme

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Cyan;
pub const HINT: Color = Color::Blue;
pub const CHECKED: Color = Color::Green;
pub const FOREGROUND: Color = Color::White;
pub const MUTED: Color = Color::DarkGray;

/// Input title and filter cursor
pub fn heading() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

/// Item labels and filter text
pub fn label() -> Style {
    Style::default().fg(FOREGROUND)
}

/// Placeholders, rulers and the empty-state message
pub fn placeholder() -> Style {
    Style::default().fg(MUTED)
}

/// Keyboard-focused row
pub fn focused_row() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(ACCENT)
        .add_modifier(Modifier::BOLD)
}

/// Row whose value is in the selection
pub fn selected_row() -> Style {
    Style::default().fg(CHECKED).add_modifier(Modifier::BOLD)
}

/// Part of a label that matched the filter
pub fn matched(base: Style) -> Style {
    base.add_modifier(Modifier::UNDERLINED)
}

pub fn frame() -> Style {
    Style::default().fg(ACCENT)
}

/// Frame of the open list and of the input while it is open
pub fn frame_open() -> Style {
    frame().add_modifier(Modifier::BOLD)
}

/// Key names, carets and the clear label
pub fn hint() -> Style {
    Style::default().fg(HINT)
}

/// Arrow between anchor and list
pub fn arrow() -> Style {
    Style::default().fg(ACCENT)
}
