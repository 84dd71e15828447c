//! Picker application state
//!
//! Hosts a single select input on a scrollable page and drives a
//! [`Dropdown`] anchored to it. Split into:
//! - `state.rs` - Page geometry and item filtering
//! - `handlers.rs` - Key, mouse, resize and dropdown event handling

mod handlers;
pub mod state;

use ratatui::layout::Rect;
use std::time::Instant;

use crate::config::DropdownConfig;
use crate::dropdown::{AnchorRect, Dropdown, DropdownProps, Item, Tick, Viewport};

pub use state::{filter_items, Document, Outcome};

/// Startup options for [`App`]
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub items: Vec<Item<String>>,
    pub selected: Vec<String>,
    pub multiselect: bool,
    pub filter: String,
    pub title: Option<String>,
    pub hook: Option<String>,
    pub anchor_row: i32,
}

pub struct App {
    pub config: DropdownConfig,
    /// Every item, unfiltered
    pub items: Vec<Item<String>>,
    pub selected: Vec<String>,
    pub filter: String,
    pub multiselect: bool,
    pub title: Option<String>,
    pub hook: Option<String>,
    pub document: Document,
    /// Content pane size (terminal minus the footer)
    pub width: u16,
    pub height: u16,
    pub dropdown: Option<Dropdown<String>>,
    pub should_quit: bool,
    pub outcome: Option<Outcome>,
}

impl App {
    pub fn new(config: DropdownConfig, options: AppOptions) -> Self {
        Self {
            config,
            items: options.items,
            selected: options.selected,
            filter: options.filter,
            multiselect: options.multiselect,
            title: options.title,
            hook: options.hook,
            document: Document::new(options.anchor_row),
            width: 0,
            height: 0,
            dropdown: None,
            should_quit: false,
            outcome: None,
        }
    }

    /// Set the content pane size
    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        // Keep the scroll offset valid for the new height
        self.document.scroll_by(0, height as i32);
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.height as i32, self.document.scroll_top)
    }

    /// Anchor box in document coordinates
    pub fn anchor_rect(&self) -> AnchorRect {
        self.document.anchor(self.width)
    }

    /// Anchor box on screen, clipped to the content pane
    pub fn anchor_area(&self) -> Option<Rect> {
        let rect = self.anchor_rect();
        let top = rect.top - self.document.scroll_top;
        let bottom = (top + rect.height).min(self.height as i32);
        let top = top.max(0);
        if bottom <= top || rect.width <= 0 {
            return None;
        }
        Some(Rect::new(
            rect.left as u16,
            top as u16,
            rect.width as u16,
            (bottom - top) as u16,
        ))
    }

    /// Items matching the current filter
    pub fn visible_items(&self) -> Vec<Item<String>> {
        filter_items(&self.items, &self.filter)
    }

    pub fn props(&self) -> DropdownProps<String> {
        DropdownProps {
            items: self.visible_items(),
            selected_items: self.selected.clone(),
            multiselect: self.multiselect,
            filter: self.filter.clone(),
            anchor: Some(self.anchor_rect()),
            viewport: self.viewport(),
            hook: self.hook.clone(),
            received_hook: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.dropdown.is_some()
    }

    pub fn open_dropdown(&mut self) {
        if self.dropdown.is_some() {
            return;
        }
        let mut dropdown = Dropdown::new(self.config.clone());
        dropdown.on_update(self.props());
        dropdown.on_mount();
        tracing::info!(items = self.items.len(), "Dropdown opened");
        self.dropdown = Some(dropdown);
    }

    pub fn close_dropdown(&mut self) {
        if let Some(mut dropdown) = self.dropdown.take() {
            dropdown.on_unmount();
            tracing::info!("Dropdown closed");
        }
    }

    /// Push current props into the open dropdown
    pub fn sync_dropdown(&mut self) {
        let props = self.props();
        if let Some(dropdown) = self.dropdown.as_mut() {
            dropdown.on_update(props);
        }
    }

    /// When the dropdown wants its next update loop frame
    pub fn frame_deadline(&self) -> Option<Instant> {
        self.dropdown.as_ref().and_then(|d| d.frame_deadline())
    }

    /// Run one update loop frame
    pub fn on_frame(&mut self, now: Instant) -> Tick {
        let anchor = self.anchor_rect();
        match self.dropdown.as_mut() {
            Some(dropdown) => dropdown.on_frame(now, &anchor),
            None => Tick::Idle,
        }
    }

    /// Post-draw text pass. Returns true if another draw is needed.
    pub fn after_render(&mut self) -> bool {
        self.dropdown
            .as_mut()
            .is_some_and(|dropdown| dropdown.after_render())
    }

    /// Labels of the selected values, in selection order
    pub fn selected_labels(&self) -> Vec<&str> {
        self.selected
            .iter()
            .filter_map(|value| {
                self.items
                    .iter()
                    .find(|item| &item.value == value)
                    .map(|item| item.label.as_str())
            })
            .collect()
    }

    /// Final outcome. Quitting without choosing counts as cancelled.
    pub fn result(&self) -> Outcome {
        self.outcome.clone().unwrap_or(Outcome::Cancelled)
    }
}
