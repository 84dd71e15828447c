//! Keyboard navigation for the dropdown list
//!
//! Only the arrow keys, Enter and Escape are handled here. Everything else
//! falls through to the filter input.

use crossterm::event::KeyCode;

/// Keys the dropdown reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Up,
    Down,
    Enter,
    Escape,
}

impl NavKey {
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up => Some(NavKey::Up),
            KeyCode::Down => Some(NavKey::Down),
            KeyCode::Enter => Some(NavKey::Enter),
            KeyCode::Esc => Some(NavKey::Escape),
            _ => None,
        }
    }
}

/// How the list should scroll after a focus change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTo {
    /// Reset the list scroll position to the top
    Top,
    /// Bring the row into view, aligned to the top edge (moving up) or the
    /// bottom edge (moving down)
    Row { index: usize, align_top: bool },
}

/// Result of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key is not ours
    Ignored,
    /// Key was consumed without effect (arrow at either end of the list)
    Consumed,
    /// Focus moved
    Focus { index: usize, scroll: ScrollTo },
    /// Select the item at this index
    Select(usize),
    /// Close the dropdown
    Close,
}

impl KeyAction {
    /// Whether the host should stop default handling of the key
    pub fn is_consumed(&self) -> bool {
        !matches!(self, KeyAction::Ignored)
    }
}

/// Map a key press to an action for a list of `len` items
pub fn handle_key(key: NavKey, focused_index: usize, len: usize) -> KeyAction {
    match key {
        NavKey::Up | NavKey::Down => move_focus(key == NavKey::Up, focused_index, len),
        NavKey::Enter if focused_index < len => KeyAction::Select(focused_index),
        NavKey::Enter => KeyAction::Consumed,
        NavKey::Escape => KeyAction::Close,
    }
}

fn move_focus(up: bool, focused_index: usize, len: usize) -> KeyAction {
    if len == 0 {
        return KeyAction::Consumed;
    }

    let index = if up {
        focused_index.saturating_sub(1)
    } else {
        (focused_index + 1).min(len - 1)
    };

    if index == focused_index {
        return KeyAction::Consumed;
    }

    let scroll = if index == 0 {
        ScrollTo::Top
    } else {
        ScrollTo::Row {
            index,
            align_top: up,
        }
    };

    KeyAction::Focus { index, scroll }
}

/// New scroll offset that brings `scroll` into effect for a list showing
/// `visible_rows` rows out of `len`
pub fn scroll_offset(scroll: ScrollTo, visible_rows: usize, len: usize) -> usize {
    let max_offset = len.saturating_sub(visible_rows);
    match scroll {
        ScrollTo::Top => 0,
        ScrollTo::Row {
            index,
            align_top: true,
        } => index.min(max_offset),
        ScrollTo::Row {
            index,
            align_top: false,
        } => (index + 1).saturating_sub(visible_rows).min(max_offset),
    }
}
