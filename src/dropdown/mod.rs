//! Anchored select dropdown
//!
//! [`Dropdown`] owns the widget-local state: placement, focused row, list
//! scroll, fitted row text and the update loop. The caller owns the items,
//! the filter text and the selected values, passes them in through
//! [`Dropdown::on_update`] and receives changes back as [`DropdownEvent`]s.
//!
//! Lifecycle:
//! - `on_update` on every prop change (repositions against the anchor)
//! - `on_mount` once the dropdown is shown (registers scroll/resize/key handling)
//! - `after_render` after each draw (fits row text)
//! - `on_unmount` on teardown (unregisters everything, cancels the loop)

pub mod keyboard;
pub mod position;
pub mod selection;
pub mod update_loop;

use std::time::Instant;

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use unicode_width::UnicodeWidthStr;

use crate::config::DropdownConfig;
use crate::constants::MAX_FILTER_LENGTH;
use crate::text::{FilterMode, RowText, TextPass};
use crate::ui::widgets::list_item::{self, ListItem, RowEvent};

pub use keyboard::{KeyAction, NavKey, ScrollTo};
pub use position::{Anchor, AnchorRect, Bounds, Direction, Offset, Placement, PlacementPatch, Viewport};
pub use selection::{Item, RenderItem};
pub use update_loop::{Tick, UpdateLoop};

/// Rows taken by the border (top and bottom) and the filter line
pub const CHROME_ROWS: i32 = 3;

/// Clickable label that clears a multi-selection
pub const CLEAR_LABEL: &str = " Clear ";

/// Outbound notifications for the embedding caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownEvent<V> {
    /// New full selection
    Select(Vec<V>),
    /// Escape pressed
    Close,
    /// Filter text edited; the caller decides the new filter and items
    FilterInput(String),
    /// Pointer entered a row
    ItemOver(Item<V>),
}

/// How an input event was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Handled<V> {
    /// Not ours; the host may apply its default handling
    Ignored,
    /// Consumed; the host must not apply its default handling
    Consumed,
    /// Consumed and the caller must be notified
    Event(DropdownEvent<V>),
}

impl<V> Handled<V> {
    pub fn is_consumed(&self) -> bool {
        !matches!(self, Handled::Ignored)
    }

    pub fn into_event(self) -> Option<DropdownEvent<V>> {
        match self {
            Handled::Event(event) => Some(event),
            _ => None,
        }
    }
}

/// Caller-owned inputs
#[derive(Debug, Clone, PartialEq)]
pub struct DropdownProps<V> {
    pub items: Vec<Item<V>>,
    pub selected_items: Vec<V>,
    pub multiselect: bool,
    pub filter: String,
    pub anchor: Option<AnchorRect>,
    pub viewport: Viewport,
    pub hook: Option<String>,
    /// Deprecated alias of `hook`
    pub received_hook: Option<String>,
}

impl<V> Default for DropdownProps<V> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected_items: Vec::new(),
            multiselect: false,
            filter: String::new(),
            anchor: None,
            viewport: Viewport::default(),
            hook: None,
            received_hook: None,
        }
    }
}

/// Event sources registered while mounted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Listeners {
    pub resize: bool,
    pub scroll: bool,
    pub keydown: bool,
}

impl Listeners {
    fn all() -> Self {
        Self {
            resize: true,
            scroll: true,
            keydown: true,
        }
    }
}

pub struct Dropdown<V> {
    config: DropdownConfig,
    props: DropdownProps<V>,
    hook: Option<String>,
    placement: Placement,
    focused_index: usize,
    scroll_offset: usize,
    hovered: Option<usize>,
    rows: Vec<RowText>,
    update_loop: UpdateLoop,
    listeners: Listeners,
    filter_focused: bool,
    /// Filter whose pattern error was last logged
    warned_filter: Option<String>,
    destroyed: bool,
}

impl<V: Clone + PartialEq> Dropdown<V> {
    pub fn new(config: DropdownConfig) -> Self {
        let update_loop = UpdateLoop::new(&config.timing);
        Self {
            config,
            props: DropdownProps::default(),
            hook: None,
            placement: Placement::default(),
            focused_index: 0,
            scroll_offset: 0,
            hovered: None,
            rows: Vec::new(),
            update_loop,
            listeners: Listeners::default(),
            filter_focused: false,
            warned_filter: None,
            destroyed: false,
        }
    }

    // == Lifecycle ==========================================================

    /// Receive new props. Repositions against the anchor when one is given.
    pub fn on_update(&mut self, props: DropdownProps<V>) {
        if self.destroyed {
            return;
        }

        let mut hook = props.hook.clone().or_else(|| self.hook.clone());
        if let Some(received) = &props.received_hook {
            if hook.as_ref() != Some(received) {
                tracing::warn!(
                    id = "received-hook-deprecated",
                    until = "2.0.0",
                    "received_hook has been deprecated in favor of hook"
                );
                hook = Some(received.clone());
            }
        }
        self.hook = hook;

        let anchor = props.anchor;
        let viewport = props.viewport;
        self.props = props;
        self.clamp_focus();

        if let Some(anchor) = anchor {
            self.reposition(&anchor, viewport);
        }
    }

    /// Dropdown became visible: focus the filter and start listening
    pub fn on_mount(&mut self) {
        if self.destroyed {
            return;
        }

        self.filter_focused = true;
        self.listeners = Listeners::all();

        if let Some(anchor) = self.props.anchor {
            self.reposition(&anchor, self.props.viewport);
        }

        tracing::debug!(hook = ?self.hook, "Dropdown mounted");
    }

    /// Dropdown is going away: stop listening and cancel any running loop
    pub fn on_unmount(&mut self) {
        self.listeners = Listeners::default();
        self.update_loop.destroy();
        self.filter_focused = false;
        self.destroyed = true;
        tracing::debug!(hook = ?self.hook, "Dropdown unmounted");
    }

    /// Fit row labels after a draw. Returns true if the rows changed and
    /// another draw is needed.
    pub fn after_render(&mut self) -> bool {
        if self.destroyed {
            return false;
        }

        let pass = TextPass {
            filter: &self.props.filter,
            mode: if self.config.text.escape_dropdown_filter {
                FilterMode::Literal
            } else {
                FilterMode::Pattern
            },
            width: self.label_width(),
            ellipsis: &self.config.text.ellipsis,
        };

        let labels = self.props.items.iter().map(|item| item.label.as_str());
        // Scroll offset is kept across the swap
        let (changed, error) = pass.apply(labels, &mut self.rows);

        // Log a bad pattern once, not on every pass
        match error {
            Some(e) if self.warned_filter.as_deref() != Some(self.props.filter.as_str()) => {
                tracing::warn!("Skipping highlight: {}", e);
                self.warned_filter = Some(self.props.filter.clone());
            }
            Some(_) => {}
            None => self.warned_filter = None,
        }

        changed
    }

    // == Positioning ========================================================

    /// Recompute placement and apply it. Returns the applied patch; empty
    /// when nothing moved or the widget is torn down.
    pub fn reposition(&mut self, anchor: &impl Anchor, viewport: Viewport) -> PlacementPatch {
        if self.destroyed {
            return PlacementPatch::default();
        }

        self.props.viewport = viewport;
        let Some(rect) = anchor.bounds() else {
            return PlacementPatch::default();
        };
        self.props.anchor = Some(rect);

        let patch = position::compute_patch(&rect, &viewport, &self.placement, &self.config.metrics);
        if self.placement.apply(&patch) {
            tracing::debug!(?patch, "Dropdown repositioned");
            self.clamp_scroll();
        }
        patch
    }

    /// Document scrolled
    pub fn on_scroll(&mut self, now: Instant, viewport: Viewport) {
        if self.listeners.scroll {
            self.props.viewport = viewport;
            self.update_loop.interact(now);
        }
    }

    /// Window resized
    pub fn on_resize(&mut self, now: Instant, viewport: Viewport) {
        if self.listeners.resize {
            self.props.viewport = viewport;
            self.update_loop.interact(now);
        }
    }

    /// When the update loop wants its next frame
    pub fn frame_deadline(&self) -> Option<Instant> {
        self.update_loop.deadline()
    }

    /// Run one update loop frame against the current anchor geometry
    pub fn on_frame(&mut self, now: Instant, anchor: &impl Anchor) -> Tick {
        let tick = self.update_loop.tick(now);
        if tick == Tick::Reposition {
            self.reposition(anchor, self.props.viewport);
        }
        tick
    }

    // == Input ==============================================================

    pub fn handle_key(&mut self, code: KeyCode) -> Handled<V> {
        if !self.listeners.keydown {
            return Handled::Ignored;
        }

        if let Some(key) = NavKey::from_key_code(code) {
            let len = self.props.items.len();
            return match keyboard::handle_key(key, self.focused_index, len) {
                KeyAction::Ignored => Handled::Ignored,
                KeyAction::Consumed => Handled::Consumed,
                KeyAction::Focus { index, scroll } => {
                    self.focused_index = index;
                    self.scroll_offset = keyboard::scroll_offset(scroll, self.visible_rows(), len);
                    Handled::Consumed
                }
                KeyAction::Select(index) => {
                    let value = self.props.items[index].value.clone();
                    Handled::Event(self.select_item(value))
                }
                KeyAction::Close => Handled::Event(DropdownEvent::Close),
            };
        }

        // Tab moves focus between the filter and the list
        if matches!(code, KeyCode::Tab | KeyCode::BackTab) {
            self.filter_focused = !self.filter_focused;
            return Handled::Consumed;
        }

        if !self.filter_focused {
            return Handled::Ignored;
        }

        match code {
            KeyCode::Char(c) if self.props.filter.chars().count() < MAX_FILTER_LENGTH => {
                let mut text = self.props.filter.clone();
                text.push(c);
                Handled::Event(DropdownEvent::FilterInput(text))
            }
            KeyCode::Backspace if !self.props.filter.is_empty() => {
                let mut text = self.props.filter.clone();
                text.pop();
                Handled::Event(DropdownEvent::FilterInput(text))
            }
            KeyCode::Char(_) | KeyCode::Backspace => Handled::Consumed,
            _ => Handled::Ignored,
        }
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) -> Handled<V> {
        if self.destroyed || !self.contains(event.column, event.row) {
            if matches!(event.kind, MouseEventKind::Moved) {
                self.hovered = None;
            }
            return Handled::Ignored;
        }

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Pressing the filter line focuses it; anything else in the
                // box takes focus from it
                self.filter_focused = false;
                if self.clear_hit(event.column, event.row) {
                    return Handled::Event(self.clear());
                }
                if event.row as i32 == self.list_bounds().y + 1 {
                    self.filter_focused = true;
                    return Handled::Consumed;
                }
                let Some(index) = self.row_at(event.column, event.row) else {
                    return Handled::Consumed;
                };
                let row_event = self.row(index).on_mouse_down();
                match row_event {
                    RowEvent::Select(value) => Handled::Event(self.select_item(value)),
                    RowEvent::ItemOver(_) => Handled::Consumed,
                }
            }
            MouseEventKind::Moved => {
                let index = self.row_at(event.column, event.row);
                if index == self.hovered {
                    return Handled::Consumed;
                }
                self.hovered = index;
                let row_event = index.map(|i| self.row(i).on_mouse_enter());
                match row_event {
                    Some(RowEvent::ItemOver(item)) => {
                        self.focus_on_item(&item.value);
                        Handled::Event(DropdownEvent::ItemOver(item))
                    }
                    _ => Handled::Consumed,
                }
            }
            MouseEventKind::ScrollDown => {
                let max = self.props.items.len().saturating_sub(self.visible_rows());
                self.scroll_offset = (self.scroll_offset + 1).min(max);
                Handled::Consumed
            }
            MouseEventKind::ScrollUp => {
                self.scroll_offset = self.scroll_offset.saturating_sub(1);
                Handled::Consumed
            }
            _ => Handled::Consumed,
        }
    }

    // == Actions ============================================================

    /// Compute the selection after choosing `value`
    pub fn select_item(&mut self, value: V) -> DropdownEvent<V> {
        let multiselect = self.props.multiselect;
        let values = selection::select_value(multiselect, &self.props.selected_items, value);

        if multiselect {
            // Give focus back to the filter after toggling a row
            self.filter_focused = true;
        }

        DropdownEvent::Select(values)
    }

    /// Clear the whole selection
    pub fn clear(&mut self) -> DropdownEvent<V> {
        self.filter_focused = true;
        DropdownEvent::Select(Vec::new())
    }

    /// Move keyboard focus to the row holding `value`
    pub fn focus_on_item(&mut self, value: &V) {
        if let Some(index) = selection::index_of(&self.props.items, value) {
            self.focused_index = index;
        }
    }

    // == Derived state ======================================================

    pub fn config(&self) -> &DropdownConfig {
        &self.config
    }

    pub fn items(&self) -> &[Item<V>] {
        &self.props.items
    }

    pub fn selected_items(&self) -> &[V] {
        &self.props.selected_items
    }

    pub fn filter(&self) -> &str {
        &self.props.filter
    }

    pub fn is_multiselect(&self) -> bool {
        self.props.multiselect
    }

    pub fn hook(&self) -> Option<&str> {
        self.hook.as_deref()
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    pub fn viewport(&self) -> Viewport {
        self.props.viewport
    }

    pub fn focused_index(&self) -> usize {
        self.focused_index
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn rows(&self) -> &[RowText] {
        &self.rows
    }

    pub fn listeners(&self) -> Listeners {
        self.listeners
    }

    pub fn is_filter_focused(&self) -> bool {
        self.filter_focused
    }

    pub fn is_updating(&self) -> bool {
        self.update_loop.is_running()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn show_empty_message(&self) -> bool {
        selection::show_empty_message(&self.props.items)
    }

    pub fn active_descendant(&self) -> Option<String> {
        if self.props.items.is_empty() {
            return None;
        }
        selection::active_descendant(Some(self.focused_index))
    }

    pub fn render_items(&self) -> Vec<RenderItem<V>> {
        selection::render_items(&self.props.items, &self.props.selected_items)
    }

    /// Whether the clear label is shown
    pub fn shows_clear(&self) -> bool {
        self.props.multiselect && !self.props.selected_items.is_empty()
    }

    /// List box in viewport coordinates
    pub fn list_bounds(&self) -> Bounds {
        let content_rows = self.props.items.len().max(1) as i32;
        self.placement
            .bounds(self.props.viewport.height, CHROME_ROWS + content_rows)
    }

    /// Number of item rows that fit in the list box
    pub fn visible_rows(&self) -> usize {
        (self.list_bounds().height - CHROME_ROWS).max(0) as usize
    }

    /// Columns available for a label inside a row
    pub fn label_width(&self) -> usize {
        let inner = (self.list_bounds().width - 2).max(0) as usize;
        inner.saturating_sub(list_item::prefix_width(self.props.multiselect))
    }

    /// Row widget for the item at `index`
    pub fn row(&self, index: usize) -> ListItem<'_, V> {
        let item = &self.props.items[index];
        let mut row = ListItem::new(item, index)
            .filter(&self.props.filter)
            .multiselect(self.props.multiselect)
            .selected(self.props.selected_items.contains(&item.value))
            .focused(index == self.focused_index);
        if let Some(text) = self.rows.get(index).filter(|t| t.full == item.label) {
            row = row.display(&text.display);
        }
        row
    }

    /// Index of the item row under a viewport position
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let b = self.list_bounds();
        let (column, row) = (column as i32, row as i32);
        let first_row = b.y + 2;

        if column <= b.x || column >= b.x + b.width - 1 || row < first_row {
            return None;
        }

        let offset = (row - first_row) as usize;
        if offset >= self.visible_rows() {
            return None;
        }

        let index = self.scroll_offset + offset;
        (index < self.props.items.len()).then_some(index)
    }

    fn contains(&self, column: u16, row: u16) -> bool {
        let b = self.list_bounds();
        let (column, row) = (column as i32, row as i32);
        column >= b.x && column < b.x + b.width && row >= b.y && row < b.y + b.height
    }

    fn clear_hit(&self, column: u16, row: u16) -> bool {
        if !self.shows_clear() {
            return false;
        }
        let b = self.list_bounds();
        let end = b.x + b.width - 1;
        let start = end - CLEAR_LABEL.width() as i32;
        row as i32 == b.y + 1 && (column as i32) >= start && (column as i32) < end
    }

    fn clamp_focus(&mut self) {
        let len = self.props.items.len();
        if self.focused_index >= len {
            self.focused_index = len.saturating_sub(1);
        }
        self.clamp_scroll();
    }

    fn clamp_scroll(&mut self) {
        let max = self.props.items.len().saturating_sub(self.visible_rows());
        self.scroll_offset = self.scroll_offset.min(max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use std::io;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn fruits() -> Vec<Item<u32>> {
        vec![
            Item::new(1, "Apple"),
            Item::new(2, "Banana"),
            Item::new(3, "Cherry"),
            Item::new(4, "Date"),
            Item::new(5, "Elderberry"),
        ]
    }

    /// Anchor on row 2 of a 30-row terminal, so the list opens below on row 4
    fn props(multiselect: bool, selected: Vec<u32>) -> DropdownProps<u32> {
        DropdownProps {
            items: fruits(),
            selected_items: selected,
            multiselect,
            anchor: Some(AnchorRect::new(2, 5, 20, 1)),
            viewport: Viewport::new(30, 0),
            ..Default::default()
        }
    }

    fn mounted(multiselect: bool, selected: Vec<u32>) -> Dropdown<u32> {
        let mut dropdown = Dropdown::new(DropdownConfig::terminal());
        dropdown.on_update(props(multiselect, selected));
        dropdown.on_mount();
        dropdown
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_update_positions_below_anchor() {
        let dropdown = mounted(false, vec![]);
        let placement = dropdown.placement();
        assert_eq!(placement.direction(), Direction::Below);
        assert_eq!(placement.top, Offset::Px(2 + 1 + 1));
        assert_eq!(placement.left, 5);
        assert_eq!(placement.width, 20);
        assert_eq!(placement.max_height, 30 - 4 - 1);
        assert_eq!(dropdown.visible_rows(), 5);
    }

    #[test]
    fn test_mount_registers_and_focuses_filter() {
        let dropdown = mounted(false, vec![]);
        assert!(dropdown.is_filter_focused());
        assert_eq!(
            dropdown.listeners(),
            Listeners {
                resize: true,
                scroll: true,
                keydown: true
            }
        );
    }

    #[test]
    fn test_keyboard_navigation() {
        let mut dropdown = mounted(false, vec![]);
        assert_eq!(dropdown.handle_key(KeyCode::Down), Handled::Consumed);
        assert_eq!(dropdown.focused_index(), 1);
        assert_eq!(dropdown.active_descendant().as_deref(), Some("select-list-item-1"));

        for _ in 0..10 {
            dropdown.handle_key(KeyCode::Down);
        }
        assert_eq!(dropdown.focused_index(), 4);

        assert_eq!(
            dropdown.handle_key(KeyCode::Enter),
            Handled::Event(DropdownEvent::Select(vec![5]))
        );
        assert_eq!(
            dropdown.handle_key(KeyCode::Esc),
            Handled::Event(DropdownEvent::Close)
        );
    }

    #[test]
    fn test_enter_on_empty_list_is_noop() {
        let mut dropdown: Dropdown<u32> = Dropdown::new(DropdownConfig::terminal());
        dropdown.on_update(DropdownProps::default());
        dropdown.on_mount();
        assert_eq!(dropdown.handle_key(KeyCode::Enter), Handled::Consumed);
        assert!(dropdown.show_empty_message());
        assert_eq!(dropdown.active_descendant(), None);
    }

    #[test]
    fn test_arrow_keys_scroll_list() {
        let mut dropdown = mounted(false, vec![]);
        // Shrink the viewport: max_height = 10 - 4 - 1 leaves two item rows
        dropdown.reposition(&AnchorRect::new(2, 5, 20, 1), Viewport::new(10, 0));
        assert_eq!(dropdown.visible_rows(), 2);

        dropdown.handle_key(KeyCode::Down);
        dropdown.handle_key(KeyCode::Down);
        assert_eq!(dropdown.focused_index(), 2);
        assert_eq!(dropdown.scroll_offset(), 1);

        dropdown.handle_key(KeyCode::Up);
        assert_eq!(dropdown.scroll_offset(), 1);
        dropdown.handle_key(KeyCode::Up);
        assert_eq!(dropdown.focused_index(), 0);
        assert_eq!(dropdown.scroll_offset(), 0);
    }

    #[test]
    fn test_multiselect_toggles() {
        let mut dropdown = mounted(true, vec![3, 1]);
        dropdown.handle_key(KeyCode::Down);
        assert_eq!(
            dropdown.handle_key(KeyCode::Enter),
            Handled::Event(DropdownEvent::Select(vec![3, 1, 2]))
        );

        dropdown.handle_key(KeyCode::Up);
        assert_eq!(
            dropdown.handle_key(KeyCode::Enter),
            Handled::Event(DropdownEvent::Select(vec![3]))
        );
    }

    #[test]
    fn test_clear() {
        let mut dropdown = mounted(true, vec![1, 2]);
        assert!(dropdown.shows_clear());
        assert_eq!(dropdown.clear(), DropdownEvent::Select(vec![]));
    }

    #[test]
    fn test_filter_input_is_reported_not_applied() {
        let mut dropdown = mounted(false, vec![]);
        assert_eq!(
            dropdown.handle_key(KeyCode::Char('a')),
            Handled::Event(DropdownEvent::FilterInput("a".to_string()))
        );
        // Caller owns the filter
        assert_eq!(dropdown.filter(), "");

        dropdown.on_update(DropdownProps {
            filter: "an".to_string(),
            ..props(false, vec![])
        });
        assert_eq!(
            dropdown.handle_key(KeyCode::Backspace),
            Handled::Event(DropdownEvent::FilterInput("a".to_string()))
        );
        assert_eq!(dropdown.handle_key(KeyCode::F(2)), Handled::Ignored);
    }

    #[test]
    fn test_items_shrinking_clamps_focus() {
        let mut dropdown = mounted(false, vec![]);
        for _ in 0..4 {
            dropdown.handle_key(KeyCode::Down);
        }
        assert_eq!(dropdown.focused_index(), 4);

        dropdown.on_update(DropdownProps {
            items: fruits().into_iter().take(2).collect(),
            ..props(false, vec![])
        });
        assert_eq!(dropdown.focused_index(), 1);
    }

    /// Shared sink for captured log output
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with a warn-level subscriber and return what it logged
    fn capture_warnings(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::WARN)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    fn count(logs: &str, needle: &str) -> usize {
        logs.lines().filter(|line| line.contains(needle)).count()
    }

    #[test]
    fn test_received_hook_warns_once() {
        let mut dropdown: Dropdown<u32> = Dropdown::new(DropdownConfig::terminal());
        let logs = capture_warnings(|| {
            for _ in 0..3 {
                dropdown.on_update(DropdownProps {
                    received_hook: Some("fruit".to_string()),
                    ..Default::default()
                });
            }
        });
        assert_eq!(count(&logs, "received-hook-deprecated"), 1);
        assert_eq!(dropdown.hook(), Some("fruit"));
    }

    #[test]
    fn test_received_hook_equal_to_hook_is_silent() {
        let mut dropdown: Dropdown<u32> = Dropdown::new(DropdownConfig::terminal());
        let logs = capture_warnings(|| {
            dropdown.on_update(DropdownProps {
                hook: Some("fruit".to_string()),
                received_hook: Some("fruit".to_string()),
                ..Default::default()
            });
        });
        assert_eq!(count(&logs, "received-hook-deprecated"), 0);
        assert_eq!(dropdown.hook(), Some("fruit"));
    }

    #[test]
    fn test_invalid_filter_pattern_warns_once() {
        let mut dropdown = Dropdown::new(DropdownConfig::terminal());
        dropdown.on_update(DropdownProps {
            items: vec![Item::new(1u32, "C++ (beta)")],
            filter: "(".to_string(),
            ..props(false, vec![])
        });
        dropdown.on_mount();

        let mut swaps = 0;
        let logs = capture_warnings(|| {
            for _ in 0..50 {
                if dropdown.after_render() {
                    swaps += 1;
                }
            }
        });
        assert_eq!(swaps, 1);
        assert_eq!(count(&logs, "Skipping highlight"), 1);

        // A different bad filter is reported again
        dropdown.on_update(DropdownProps {
            items: vec![Item::new(1u32, "C++ (beta)")],
            filter: "[".to_string(),
            ..props(false, vec![])
        });
        let logs = capture_warnings(|| {
            dropdown.after_render();
            dropdown.after_render();
        });
        assert_eq!(count(&logs, "Skipping highlight"), 1);
    }

    #[test]
    fn test_tab_moves_focus_off_filter() {
        let mut dropdown = mounted(true, vec![]);
        assert_eq!(dropdown.handle_key(KeyCode::Tab), Handled::Consumed);
        assert!(!dropdown.is_filter_focused());
        // Typing no longer edits the filter
        assert_eq!(dropdown.handle_key(KeyCode::Char('a')), Handled::Ignored);

        // Toggling a row gives focus back to the filter
        dropdown.handle_key(KeyCode::Enter);
        assert!(dropdown.is_filter_focused());

        dropdown.handle_key(KeyCode::Tab);
        dropdown.handle_key(KeyCode::BackTab);
        assert!(dropdown.is_filter_focused());
    }

    #[test]
    fn test_row_press_refocuses_filter_only_in_multiselect() {
        let mut single = mounted(false, vec![]);
        single.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 6));
        assert!(!single.is_filter_focused());

        let mut multi = mounted(true, vec![]);
        multi.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 6));
        assert!(multi.is_filter_focused());
    }

    #[test]
    fn test_filter_line_press_focuses_filter() {
        let mut dropdown = mounted(false, vec![]);
        dropdown.handle_key(KeyCode::Tab);
        let handled = dropdown.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 5));
        assert_eq!(handled, Handled::Consumed);
        assert!(dropdown.is_filter_focused());
    }

    #[test]
    fn test_received_hook_is_forwarded() {
        let mut dropdown: Dropdown<u32> = Dropdown::new(DropdownConfig::terminal());
        dropdown.on_update(DropdownProps {
            received_hook: Some("fruit".to_string()),
            ..Default::default()
        });
        assert_eq!(dropdown.hook(), Some("fruit"));

        dropdown.on_update(DropdownProps {
            hook: Some("veg".to_string()),
            ..Default::default()
        });
        assert_eq!(dropdown.hook(), Some("veg"));
    }

    #[test]
    fn test_scroll_runs_update_loop() {
        let mut dropdown = mounted(false, vec![]);
        let t0 = Instant::now();
        let anchor = AnchorRect::new(20, 5, 20, 1);

        dropdown.on_scroll(t0, Viewport::new(30, 0));
        assert!(dropdown.is_updating());
        assert_eq!(dropdown.frame_deadline(), Some(t0));

        assert_eq!(dropdown.on_frame(t0, &anchor), Tick::Reposition);
        // Anchor moved into the lower half
        assert_eq!(dropdown.placement().direction(), Direction::Above);

        let later = t0 + Duration::from_millis(300);
        assert_eq!(dropdown.on_frame(later, &anchor), Tick::Settled);
        assert!(!dropdown.is_updating());
    }

    #[test]
    fn test_unmount_stops_everything() {
        let mut dropdown = mounted(false, vec![]);
        let t0 = Instant::now();
        dropdown.on_scroll(t0, Viewport::new(30, 0));

        dropdown.on_unmount();
        assert!(dropdown.is_destroyed());
        assert_eq!(dropdown.listeners(), Listeners::default());
        assert_eq!(dropdown.on_frame(t0, &AnchorRect::new(20, 5, 20, 1)), Tick::Cancelled);
        assert_eq!(dropdown.handle_key(KeyCode::Down), Handled::Ignored);

        let before = *dropdown.placement();
        let patch = dropdown.reposition(&AnchorRect::new(25, 0, 5, 1), Viewport::new(30, 0));
        assert!(patch.is_empty());
        assert_eq!(*dropdown.placement(), before);

        dropdown.on_scroll(t0, Viewport::new(30, 5));
        assert!(!dropdown.is_updating());
    }

    #[test]
    fn test_after_render_fits_and_highlights() {
        let mut dropdown = mounted(false, vec![]);
        dropdown.on_update(DropdownProps {
            filter: "an".to_string(),
            ..props(false, vec![])
        });

        assert!(dropdown.after_render());
        assert_eq!(dropdown.rows()[1].display.to_markup(), "B<u>an</u><u>an</u>a");
        assert!(!dropdown.rows()[0].display.is_highlighted());

        // Nothing changed: no swap
        assert!(!dropdown.after_render());
    }

    #[test]
    fn test_after_render_keeps_scroll() {
        let mut dropdown = mounted(false, vec![]);
        dropdown.reposition(&AnchorRect::new(2, 5, 20, 1), Viewport::new(10, 0));
        dropdown.handle_key(KeyCode::Down);
        dropdown.handle_key(KeyCode::Down);
        let offset = dropdown.scroll_offset();
        assert!(offset > 0);

        dropdown.after_render();
        assert_eq!(dropdown.scroll_offset(), offset);
    }

    #[test]
    fn test_mouse_press_selects_row() {
        let mut dropdown = mounted(false, vec![]);
        // List box starts at row 4: border on 4, filter on 5, items from 6
        assert_eq!(dropdown.row_at(10, 6), Some(0));
        assert_eq!(dropdown.row_at(10, 8), Some(2));
        assert_eq!(dropdown.row_at(5, 8), None);

        let handled = dropdown.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 7));
        assert_eq!(handled, Handled::Event(DropdownEvent::Select(vec![2])));
    }

    #[test]
    fn test_mouse_hover_moves_focus() {
        let mut dropdown = mounted(false, vec![]);
        let handled = dropdown.handle_mouse(mouse(MouseEventKind::Moved, 10, 9));
        assert_eq!(
            handled,
            Handled::Event(DropdownEvent::ItemOver(Item::new(4, "Date")))
        );
        assert_eq!(dropdown.focused_index(), 3);

        // Same row again is not a new enter
        assert_eq!(
            dropdown.handle_mouse(mouse(MouseEventKind::Moved, 11, 9)),
            Handled::Consumed
        );
    }

    #[test]
    fn test_mouse_outside_is_ignored() {
        let mut dropdown = mounted(false, vec![]);
        let handled = dropdown.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 0, 0));
        assert_eq!(handled, Handled::Ignored);
    }

    #[test]
    fn test_derived_row_data() {
        let mut dropdown = mounted(true, vec![2]);
        let rows = dropdown.render_items();
        assert_eq!(rows[1].class_name, "list-item list-item-selected");
        assert!(dropdown.is_multiselect());
        assert_eq!(
            dropdown.placement().list_style(),
            "bottom:auto;left:5px;max-height:25px;top:4px;width:20px"
        );

        let handled = dropdown.handle_key(KeyCode::Enter);
        assert!(handled.is_consumed());
        assert_eq!(handled.into_event(), Some(DropdownEvent::Select(vec![2, 1])));
        assert_eq!(Handled::<u32>::Ignored.into_event(), None);
    }

    #[test]
    fn test_clear_label_click() {
        let mut dropdown = mounted(true, vec![2]);
        // Box spans columns 5..25; label ends before the right border
        let handled = dropdown.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 20, 5));
        assert_eq!(handled, Handled::Event(DropdownEvent::Select(vec![])));
    }
}
