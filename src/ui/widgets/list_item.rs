//! Selectable list row widget

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::constants::LIST_ITEM_ROLE;
use crate::dropdown::selection::{active_descendant, Item};
use crate::text::{highlight, FilterMode, Highlighted};
use crate::ui::theme;

const FOCUS_MARKER: &str = "> ";
const NO_MARKER: &str = "  ";
const CHECKED: &str = "[x] ";
const UNCHECKED: &str = "[ ] ";

/// Columns taken before the label
pub fn prefix_width(multiselect: bool) -> usize {
    if multiselect {
        FOCUS_MARKER.len() + CHECKED.len()
    } else {
        FOCUS_MARKER.len()
    }
}

/// What a row reports to its container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowEvent<V> {
    Select(V),
    ItemOver(Item<V>),
}

pub struct ListItem<'a, V> {
    data: &'a Item<V>,
    index: usize,
    filter: &'a str,
    multiselect: bool,
    selected: bool,
    focused: bool,
    display: Option<&'a Highlighted>,
}

impl<'a, V: Clone> ListItem<'a, V> {
    pub fn new(data: &'a Item<V>, index: usize) -> Self {
        Self {
            data,
            index,
            filter: "",
            multiselect: false,
            selected: false,
            focused: false,
            display: None,
        }
    }

    pub fn filter(mut self, filter: &'a str) -> Self {
        self.filter = filter;
        self
    }

    pub fn multiselect(mut self, multiselect: bool) -> Self {
        self.multiselect = multiselect;
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Use an already fitted label instead of the row's own highlight
    pub fn display(mut self, display: &'a Highlighted) -> Self {
        self.display = Some(display);
        self
    }

    pub fn id(&self) -> String {
        active_descendant(Some(self.index)).unwrap_or_default()
    }

    pub fn role_name(&self) -> &'static str {
        LIST_ITEM_ROLE
    }

    pub fn data_value(&self) -> &V {
        &self.data.value
    }

    /// Untruncated label
    pub fn full_text(&self) -> &str {
        &self.data.label
    }

    /// Label with the filter emphasized. The filter is always escaped here.
    pub fn label(&self) -> Highlighted {
        highlight(&self.data.label, self.filter, FilterMode::Literal)
            .unwrap_or_else(|_| Highlighted::plain(self.data.label.as_str()))
    }

    /// Pointer pressed on the row
    pub fn on_mouse_down(&self) -> RowEvent<V> {
        RowEvent::Select(self.data.value.clone())
    }

    /// Pointer entered the row
    pub fn on_mouse_enter(&self) -> RowEvent<V> {
        RowEvent::ItemOver(self.data.clone())
    }

    fn base_style(&self) -> Style {
        if self.focused {
            theme::focused_row()
        } else if self.selected {
            theme::selected_row()
        } else {
            theme::label()
        }
    }
}

impl<V: Clone> Widget for ListItem<'_, V> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let style = self.base_style();
        let own_label;
        let label = match self.display {
            Some(display) => display,
            None => {
                own_label = self.label();
                &own_label
            }
        };

        let mut spans = vec![Span::styled(
            if self.focused { FOCUS_MARKER } else { NO_MARKER },
            style,
        )];

        if self.multiselect {
            spans.push(Span::styled(
                if self.selected { CHECKED } else { UNCHECKED },
                style,
            ));
        }

        for segment in label.segments() {
            let segment_style = if segment.matched {
                theme::matched(style)
            } else {
                style
            };
            spans.push(Span::styled(segment.text.to_string(), segment_style));
        }

        buf.set_style(area, style);
        Line::from(spans).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Modifier;

    fn row_text(buf: &Buffer, width: u16) -> String {
        (0..width)
            .map(|x| buf.cell((x, 0)).map(|c| c.symbol()).unwrap_or(" "))
            .collect()
    }

    fn underlined(buf: &Buffer, x: u16) -> bool {
        buf.cell((x, 0))
            .is_some_and(|c| c.modifier.contains(Modifier::UNDERLINED))
    }

    #[test]
    fn test_label_highlights_filter() {
        let banana = Item::new(2, "Banana");
        let row = ListItem::new(&banana, 1).filter("an");
        assert_eq!(row.label().to_markup(), "B<u>an</u><u>an</u>a");

        let apple = Item::new(1, "Apple");
        let row = ListItem::new(&apple, 0).filter("an");
        assert_eq!(row.label().to_markup(), "Apple");
    }

    #[test]
    fn test_label_escapes_filter() {
        let item = Item::new(1, "C++ (beta)");
        let row = ListItem::new(&item, 0).filter("(");
        assert_eq!(row.label().to_markup(), "C++ <u>(</u>beta)");
    }

    #[test]
    fn test_row_attributes() {
        let item = Item::new(7, "Grape");
        let row = ListItem::new(&item, 3);
        assert_eq!(row.id(), "select-list-item-3");
        assert_eq!(row.role_name(), "option");
        assert_eq!(*row.data_value(), 7);
        assert_eq!(row.full_text(), "Grape");
    }

    #[test]
    fn test_pointer_events() {
        let item = Item::new(7, "Grape");
        let row = ListItem::new(&item, 0);
        assert_eq!(row.on_mouse_down(), RowEvent::Select(7));
        assert_eq!(row.on_mouse_enter(), RowEvent::ItemOver(Item::new(7, "Grape")));
    }

    #[test]
    fn test_render_focused_row() {
        let item = Item::new(2, "Banana");
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        ListItem::new(&item, 0)
            .filter("an")
            .focused(true)
            .render(area, &mut buf);

        assert_eq!(row_text(&buf, 12), "> Banana    ");
        assert!(!underlined(&buf, 2)); // B
        assert!(underlined(&buf, 3)); // a
        assert!(underlined(&buf, 6)); // n
        assert!(!underlined(&buf, 7)); // a
        assert_eq!(buf.cell((0, 0)).map(|c| c.bg), Some(theme::ACCENT));
    }

    #[test]
    fn test_render_multiselect_checkbox() {
        let item = Item::new(1, "Apple");
        let area = Rect::new(0, 0, 12, 1);
        let mut buf = Buffer::empty(area);
        ListItem::new(&item, 0)
            .multiselect(true)
            .selected(true)
            .render(area, &mut buf);
        assert_eq!(row_text(&buf, 12), "  [x] Apple ");
        assert_eq!(prefix_width(true), 6);
    }

    #[test]
    fn test_render_uses_fitted_display() {
        let item = Item::new(1, "Elderberry");
        let fitted = Highlighted::plain("Elder…");
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        ListItem::new(&item, 0).display(&fitted).render(area, &mut buf);
        assert_eq!(row_text(&buf, 8), "  Elder…");
    }
}
