//! Input handlers for the picker

use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};
use std::time::Instant;

use super::state::{Outcome, SCROLL_STEP};
use super::App;
use crate::dropdown::{DropdownEvent, Handled};

impl App {
    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        // The open dropdown gets the key first
        if let Some(dropdown) = self.dropdown.as_mut() {
            match dropdown.handle_key(key) {
                Handled::Event(event) => return self.handle_dropdown_event(event),
                Handled::Consumed => return,
                Handled::Ignored => {}
            }
        }

        match key {
            KeyCode::PageUp => self.scroll_document(-SCROLL_STEP, now),
            KeyCode::PageDown => self.scroll_document(SCROLL_STEP, now),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down if !self.is_open() => {
                self.open_dropdown();
            }
            KeyCode::Esc | KeyCode::Char('q') if !self.is_open() => {
                self.outcome = Some(Outcome::Cancelled);
                self.should_quit = true;
            }
            _ => {}
        }
    }

    /// Handle mouse input
    pub fn handle_mouse(&mut self, event: MouseEvent, now: Instant) {
        if let Some(dropdown) = self.dropdown.as_mut() {
            match dropdown.handle_mouse(event) {
                Handled::Event(event) => return self.handle_dropdown_event(event),
                Handled::Consumed => return,
                Handled::Ignored => {}
            }
        }

        match event.kind {
            MouseEventKind::ScrollUp => self.scroll_document(-1, now),
            MouseEventKind::ScrollDown => self.scroll_document(1, now),
            MouseEventKind::Down(MouseButton::Left) => {
                let on_anchor = self.anchor_area().is_some_and(|area| {
                    event.column >= area.x
                        && event.column < area.right()
                        && event.row >= area.y
                        && event.row < area.bottom()
                });
                if on_anchor && !self.is_open() {
                    self.open_dropdown();
                } else if !on_anchor && self.is_open() {
                    self.close_dropdown();
                }
            }
            _ => {}
        }
    }

    /// Terminal resized; `height` is the content pane height
    pub fn handle_resize(&mut self, width: u16, height: u16, now: Instant) {
        self.set_size(width, height);
        let viewport = self.viewport();
        if let Some(dropdown) = self.dropdown.as_mut() {
            dropdown.on_resize(now, viewport);
        }
    }

    /// Apply a dropdown notification
    pub fn handle_dropdown_event(&mut self, event: DropdownEvent<String>) {
        match event {
            DropdownEvent::Select(values) => {
                tracing::info!(?values, "Selection changed");
                self.selected = values;
                if self.multiselect {
                    self.sync_dropdown();
                } else {
                    self.outcome = Some(Outcome::Selected(self.selected.clone()));
                    self.close_dropdown();
                    self.should_quit = true;
                }
            }
            DropdownEvent::Close => {
                self.close_dropdown();
                self.outcome = Some(if self.multiselect {
                    Outcome::Selected(self.selected.clone())
                } else {
                    Outcome::Cancelled
                });
                self.should_quit = true;
            }
            DropdownEvent::FilterInput(text) => {
                self.filter = text;
                self.sync_dropdown();
            }
            DropdownEvent::ItemOver(item) => {
                tracing::debug!(value = %item.value, "Pointer over item");
            }
        }
    }

    fn scroll_document(&mut self, delta: i32, now: Instant) {
        if !self.document.scroll_by(delta, self.height as i32) {
            return;
        }
        let viewport = self.viewport();
        if let Some(dropdown) = self.dropdown.as_mut() {
            dropdown.on_scroll(now, viewport);
        }
    }
}
