//! Common layout helpers

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::dropdown::Bounds;

/// Clip viewport-space bounds to the drawable area.
/// Returns `None` when nothing of the box is visible.
pub fn clip_bounds(bounds: Bounds, area: Rect) -> Option<Rect> {
    let left = bounds.x.max(area.x as i32);
    let top = bounds.y.max(area.y as i32);
    let right = (bounds.x + bounds.width).min(area.right() as i32);
    let bottom = (bounds.y + bounds.height).min(area.bottom() as i32);

    if right <= left || bottom <= top {
        return None;
    }

    Some(Rect::new(
        left as u16,
        top as u16,
        (right - left) as u16,
        (bottom - top) as u16,
    ))
}

/// Split area into content and footer
pub fn main_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Document
            Constraint::Length(1), // Key hints
        ])
        .split(area);
    (chunks[0], chunks[1])
}
