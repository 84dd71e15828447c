//! Select input box the dropdown is anchored to

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::ui::theme;

const PLACEHOLDER: &str = "Select…";

pub struct AnchorInput<'a> {
    labels: Vec<&'a str>,
    title: Option<&'a str>,
    open: bool,
}

impl<'a> AnchorInput<'a> {
    pub fn new(labels: Vec<&'a str>) -> Self {
        Self {
            labels,
            title: None,
            open: false,
        }
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }
}

impl Widget for AnchorInput<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default().borders(Borders::ALL).border_style(if self.open {
            theme::frame_open()
        } else {
            theme::frame()
        });

        if let Some(title) = self.title {
            block = block.title(Span::styled(title, theme::heading()));
        }

        let caret = if self.open { " ▴" } else { " ▾" };
        let line = if self.labels.is_empty() {
            Line::from(vec![
                Span::styled(PLACEHOLDER, theme::placeholder()),
                Span::styled(caret, theme::hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled(self.labels.join(", "), theme::label()),
                Span::styled(caret, theme::hint()),
            ])
        };

        Paragraph::new(line).block(block).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(buf: &Buffer, y: u16, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, y)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    #[test]
    fn test_placeholder_when_empty() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        AnchorInput::new(Vec::new()).render(area, &mut buf);
        assert!(line(&buf, 1, 20).starts_with("│Select… ▾"));
    }

    #[test]
    fn test_selected_labels_joined() {
        let area = Rect::new(0, 0, 24, 3);
        let mut buf = Buffer::empty(area);
        AnchorInput::new(vec!["Apple", "Cherry"])
            .title(" Fruit ")
            .open(true)
            .render(area, &mut buf);
        assert!(line(&buf, 1, 24).starts_with("│Apple, Cherry ▴"));
        assert!(line(&buf, 0, 24).starts_with("┌ Fruit "));
    }
}
