//! Dropdown overlay widget
//!
//! Draws a [`Dropdown`] at its computed placement. The render area is the
//! viewport the placement was computed against.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::dropdown::{position::ArrowEdge, Dropdown, CLEAR_LABEL};
use crate::ui::layout::clip_bounds;
use crate::ui::theme;

const FILTER_PROMPT: &str = "› ";
const FILTER_PLACEHOLDER: &str = "Type to filter";
const CURSOR: &str = "▏";
const ARROW_UP: &str = "▲";
const ARROW_DOWN: &str = "▼";

pub struct DropdownView<'a, V> {
    dropdown: &'a Dropdown<V>,
}

impl<'a, V> DropdownView<'a, V> {
    pub fn new(dropdown: &'a Dropdown<V>) -> Self {
        Self { dropdown }
    }
}

impl<V: Clone + PartialEq> Widget for DropdownView<'_, V> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dropdown = self.dropdown;
        let Some(rect) = clip_bounds(dropdown.list_bounds(), area) else {
            return;
        };

        render_arrow(dropdown, area, buf);

        Clear.render(rect, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme::frame_open());
        let inner = block.inner(rect);
        block.render(rect, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        // Filter line
        let filter_area = Rect::new(inner.x, inner.y, inner.width, 1);
        let mut spans = vec![Span::styled(FILTER_PROMPT, theme::hint())];
        if dropdown.filter().is_empty() {
            spans.push(Span::styled(FILTER_PLACEHOLDER, theme::placeholder()));
        } else {
            spans.push(Span::styled(dropdown.filter(), theme::label()));
        }
        if dropdown.is_filter_focused() {
            spans.push(Span::styled(CURSOR, theme::heading()));
        }
        Line::from(spans).render(filter_area, buf);

        if dropdown.shows_clear() {
            let width = CLEAR_LABEL.width() as u16;
            if width < inner.width {
                let clear_area = Rect::new(inner.right() - width, inner.y, width, 1);
                Span::styled(CLEAR_LABEL, theme::hint()).render(clear_area, buf);
            }
        }

        // Rows
        let list_top = inner.y + 1;
        let list_height = inner.bottom().saturating_sub(list_top);

        if dropdown.show_empty_message() {
            if list_height > 0 {
                let empty_area = Rect::new(inner.x, list_top, inner.width, 1);
                Span::styled(dropdown.config().text.empty_message.as_str(), theme::placeholder())
                    .render(empty_area, buf);
            }
            return;
        }

        let first = dropdown.scroll_offset();
        let count = dropdown
            .visible_rows()
            .min(list_height as usize)
            .min(dropdown.items().len().saturating_sub(first));

        for offset in 0..count {
            let row_area = Rect::new(inner.x, list_top + offset as u16, inner.width, 1);
            dropdown.row(first + offset).render(row_area, buf);
        }
    }
}

fn render_arrow<V: Clone + PartialEq>(dropdown: &Dropdown<V>, area: Rect, buf: &mut Buffer) {
    let metrics = &dropdown.config().metrics;
    let arrow = dropdown.placement().arrow(metrics);
    let (y, symbol) = match arrow.edge {
        ArrowEdge::Top(top) => (top, ARROW_UP),
        ArrowEdge::Bottom(bottom) => (
            dropdown.viewport().height - bottom - metrics.arrow_height,
            ARROW_DOWN,
        ),
    };

    let (x, y) = (arrow.left, y);
    if x < area.x as i32 || y < area.y as i32 || x >= area.right() as i32 || y >= area.bottom() as i32 {
        return;
    }
    buf.set_string(x as u16, y as u16, symbol, theme::arrow());
}
