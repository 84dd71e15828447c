//! UI rendering module

pub mod layout;
pub mod theme;
pub mod widgets;

use ratatui::{
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use widgets::{AnchorInput, DropdownView};

const DEFAULT_TITLE: &str = " Select ";

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let (content, footer) = layout::main_layout(frame.area());

    draw_document(frame, app, content);

    if let Some(area) = app.anchor_area() {
        let title = app.title.as_deref().unwrap_or(DEFAULT_TITLE);
        let input = AnchorInput::new(app.selected_labels())
            .title(title)
            .open(app.is_open());
        frame.render_widget(input, area);
    }

    if let Some(dropdown) = app.dropdown.as_ref() {
        frame.render_widget(DropdownView::new(dropdown), content);
    }

    frame.render_widget(footer_hints(app), footer);
}

/// Ruler lines so page scrolling is visible
fn draw_document(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let first = app.document.scroll_top;
    let lines: Vec<Line> = (0..area.height as i32)
        .map(|offset| {
            let row = first + offset;
            if row % 5 == 0 {
                Line::from(Span::styled(format!("{row:>4} ┄"), theme::placeholder()))
            } else {
                Line::from("")
            }
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

fn footer_hints(app: &App) -> Paragraph<'static> {
    let hints: &[(&str, &str)] = if app.is_open() {
        &[
            ("↑/↓", "Navigate"),
            ("Enter", "Select"),
            ("Esc", "Close"),
            ("Tab", "Focus"),
            ("PgUp/PgDn", "Scroll"),
        ]
    } else {
        &[
            ("Enter", "Open"),
            ("PgUp/PgDn", "Scroll"),
            ("Esc/q", "Quit"),
        ]
    };

    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled("[", theme::placeholder()));
        spans.push(Span::styled(*key, theme::hint()));
        spans.push(Span::styled(format!("] {action}  "), theme::placeholder()));
    }
    Paragraph::new(Line::from(spans))
}
