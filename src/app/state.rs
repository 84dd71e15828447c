//! Demo host state types

use crate::dropdown::{AnchorRect, Item};

/// Anchor box height (input with borders)
pub const ANCHOR_HEIGHT: i32 = 3;

/// Left margin of the anchor inside the document
pub const ANCHOR_LEFT: i32 = 2;

/// Widest the anchor gets
pub const ANCHOR_MAX_WIDTH: i32 = 60;

/// Rows scrolled per wheel step or Page key
pub const SCROLL_STEP: i32 = 3;

/// A scrollable page with the select input placed at `anchor_row`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document {
    pub anchor_row: i32,
    pub scroll_top: i32,
}

impl Document {
    pub fn new(anchor_row: i32) -> Self {
        Self {
            anchor_row: anchor_row.max(0),
            scroll_top: 0,
        }
    }

    /// Total height: enough to scroll the anchor to the top of the viewport
    pub fn height(&self, viewport_height: i32) -> i32 {
        self.anchor_row + ANCHOR_HEIGHT + viewport_height
    }

    pub fn max_scroll(&self, viewport_height: i32) -> i32 {
        (self.height(viewport_height) - viewport_height).max(0)
    }

    /// Scroll by `delta` rows. Returns whether the offset changed.
    pub fn scroll_by(&mut self, delta: i32, viewport_height: i32) -> bool {
        let next = (self.scroll_top + delta).clamp(0, self.max_scroll(viewport_height));
        let changed = next != self.scroll_top;
        self.scroll_top = next;
        changed
    }

    /// Anchor box in document coordinates
    pub fn anchor(&self, viewport_width: u16) -> AnchorRect {
        let width = (viewport_width as i32 - 2 * ANCHOR_LEFT).clamp(1, ANCHOR_MAX_WIDTH);
        AnchorRect::new(self.anchor_row, ANCHOR_LEFT, width, ANCHOR_HEIGHT)
    }
}

/// How the picker ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(Vec<String>),
    Cancelled,
}

/// Items whose label contains `filter`, ignoring case
pub fn filter_items(items: &[Item<String>], filter: &str) -> Vec<Item<String>> {
    if filter.is_empty() {
        return items.to_vec();
    }
    let needle = filter.to_lowercase();
    items
        .iter()
        .filter(|item| item.label.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_is_clamped() {
        let mut doc = Document::new(40);
        // height = 40 + 3 + 20, max scroll = 43
        assert!(!doc.scroll_by(-5, 20));
        assert!(doc.scroll_by(100, 20));
        assert_eq!(doc.scroll_top, 43);
        assert!(doc.scroll_by(-3, 20));
        assert_eq!(doc.scroll_top, 40);
    }

    #[test]
    fn test_anchor_width_follows_viewport() {
        let doc = Document::new(10);
        assert_eq!(doc.anchor(30), AnchorRect::new(10, 2, 26, 3));
        assert_eq!(doc.anchor(200).width, ANCHOR_MAX_WIDTH);
        assert_eq!(doc.anchor(0).width, 1);
    }

    #[test]
    fn test_filter_items() {
        let items = vec![
            Item::new("apple".to_string(), "Apple"),
            Item::new("banana".to_string(), "Banana"),
        ];
        let filtered = filter_items(&items, "AN");
        assert_eq!(filtered, vec![items[1].clone()]);
        assert_eq!(filter_items(&items, "").len(), 2);
    }
}
