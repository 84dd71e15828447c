//! Dropdown placement relative to its anchor
//!
//! The dropdown opens above the anchor when the anchor sits in the lower half
//! of the (scroll-adjusted) viewport and below it otherwise. Placement is
//! expressed in viewport coordinates; anchors are measured in document
//! coordinates. Every computation returns a [`PlacementPatch`] holding only
//! the fields that differ from the current [`Placement`], so applying an
//! empty patch is a no-op for the host.

use std::fmt;

use crate::config::MetricsConfig;

/// Anchor bounding box in document coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnchorRect {
    pub top: i32,
    pub left: i32,
    pub width: i32,
    pub height: i32,
}

impl AnchorRect {
    pub fn new(top: i32, left: i32, width: i32, height: i32) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Twice the vertical center, kept doubled to avoid rounding odd heights
    fn center_y2(&self) -> i64 {
        2 * self.top as i64 + self.height as i64
    }
}

/// Something the dropdown can be positioned against
///
/// Returning `None` means the anchor is not measurable right now (not laid
/// out yet, or gone); the update is skipped for that frame.
pub trait Anchor {
    fn bounds(&self) -> Option<AnchorRect>;
}

impl Anchor for AnchorRect {
    fn bounds(&self) -> Option<AnchorRect> {
        Some(*self)
    }
}

impl Anchor for ratatui::layout::Rect {
    fn bounds(&self) -> Option<AnchorRect> {
        Some(AnchorRect::new(
            self.y as i32,
            self.x as i32,
            self.width as i32,
            self.height as i32,
        ))
    }
}

impl<T: Anchor> Anchor for Option<T> {
    fn bounds(&self) -> Option<AnchorRect> {
        self.as_ref().and_then(Anchor::bounds)
    }
}

/// Visible window metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub height: i32,
    pub scroll_top: i32,
}

impl Viewport {
    pub fn new(height: i32, scroll_top: i32) -> Self {
        Self { height, scroll_top }
    }

    /// Twice the scroll-adjusted vertical center
    fn center_y2(&self) -> i64 {
        self.height as i64 + 2 * self.scroll_top as i64
    }
}

/// Vertical edge offset: a concrete value or unset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offset {
    Px(i32),
    Auto,
}

impl Offset {
    pub fn value(self) -> Option<i32> {
        match self {
            Offset::Px(v) => Some(v),
            Offset::Auto => None,
        }
    }

    pub fn is_auto(self) -> bool {
        matches!(self, Offset::Auto)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Offset::Px(v) => write!(f, "{}px", v),
            Offset::Auto => f.write_str("auto"),
        }
    }
}

/// Which side of the anchor the dropdown opens on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Above,
    Below,
}

/// Current dropdown placement
///
/// Exactly one of `top`/`bottom` is concrete; the other is [`Offset::Auto`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub top: Offset,
    pub bottom: Offset,
    pub left: i32,
    pub width: i32,
    pub max_height: i32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            top: Offset::Px(0),
            bottom: Offset::Auto,
            left: 0,
            width: 0,
            max_height: 0,
        }
    }
}

/// Fields of a [`Placement`] that changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlacementPatch {
    pub top: Option<Offset>,
    pub bottom: Option<Offset>,
    pub left: Option<i32>,
    pub width: Option<i32>,
    pub max_height: Option<i32>,
}

impl PlacementPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Where the arrow between anchor and list is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrow {
    pub left: i32,
    pub edge: ArrowEdge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowEdge {
    /// Arrow top offset (list opens below the anchor)
    Top(i32),
    /// Arrow bottom offset (list opens above the anchor)
    Bottom(i32),
}

/// Resolved list box in viewport coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Placement {
    pub fn direction(&self) -> Direction {
        if self.top.is_auto() {
            Direction::Above
        } else {
            Direction::Below
        }
    }

    /// Apply a patch, returning whether anything changed
    pub fn apply(&mut self, patch: &PlacementPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        if let Some(top) = patch.top {
            self.top = top;
        }
        if let Some(bottom) = patch.bottom {
            self.bottom = bottom;
        }
        if let Some(left) = patch.left {
            self.left = left;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(max_height) = patch.max_height {
            self.max_height = max_height;
        }
        true
    }

    /// Inline style for the list container
    pub fn list_style(&self) -> String {
        [
            format!("bottom:{}", self.bottom),
            format!("left:{}px", self.left),
            format!("max-height:{}px", self.max_height),
            format!("top:{}", self.top),
            format!("width:{}px", self.width),
        ]
        .join(";")
    }

    /// Arrow position, horizontally centered on the anchor
    pub fn arrow(&self, metrics: &MetricsConfig) -> Arrow {
        let left = self.left + (self.width - metrics.arrow_width) / 2;
        let edge = match (self.top, self.bottom) {
            (_, Offset::Px(bottom)) if self.top.is_auto() => {
                ArrowEdge::Bottom(bottom - metrics.arrow_height + metrics.border_height)
            }
            (Offset::Px(top), _) => {
                ArrowEdge::Top(top - metrics.arrow_height + metrics.border_height)
            }
            _ => ArrowEdge::Top(0),
        };
        Arrow { left, edge }
    }

    /// Inline style for the arrow
    pub fn arrow_style(&self, metrics: &MetricsConfig) -> String {
        let arrow = self.arrow(metrics);
        let edge = match arrow.edge {
            ArrowEdge::Top(top) => format!("top:{}px", top),
            ArrowEdge::Bottom(bottom) => format!("bottom:{}px", bottom),
        };
        format!("left:{}px;{}", arrow.left, edge)
    }

    /// Resolve the list box for a given content height
    ///
    /// The box is at most `max_height` tall; when opening above, it grows
    /// upward from its bottom edge.
    pub fn bounds(&self, viewport_height: i32, content_height: i32) -> Bounds {
        let height = content_height.clamp(0, self.max_height.max(0));
        let y = match (self.top.value(), self.bottom.value()) {
            (Some(top), _) => top,
            (None, Some(bottom)) => viewport_height - bottom - height,
            (None, None) => 0,
        };
        Bounds {
            x: self.left,
            y,
            width: self.width,
            height,
        }
    }
}

/// Compute the placement patch for the current anchor geometry
pub fn compute_patch(
    anchor: &AnchorRect,
    viewport: &Viewport,
    current: &Placement,
    metrics: &MetricsConfig,
) -> PlacementPatch {
    let target = if anchor.center_y2() > viewport.center_y2() {
        position_above(anchor, viewport, current, metrics)
    } else {
        position_below(anchor, viewport, current, metrics)
    };

    let mut patch = diff(current, &target);

    if anchor.left != current.left {
        patch.left = Some(anchor.left);
    }
    if anchor.width != current.width {
        patch.width = Some(anchor.width);
    }

    patch
}

fn position_above(
    anchor: &AnchorRect,
    viewport: &Viewport,
    current: &Placement,
    metrics: &MetricsConfig,
) -> Placement {
    let bottom = viewport.height - anchor.top
        + viewport.scroll_top
        + metrics.arrow_height
        + metrics.border_height;

    Placement {
        top: Offset::Auto,
        bottom: Offset::Px(bottom),
        max_height: (viewport.height - bottom - metrics.window_margin).max(0),
        ..*current
    }
}

fn position_below(
    anchor: &AnchorRect,
    viewport: &Viewport,
    current: &Placement,
    metrics: &MetricsConfig,
) -> Placement {
    // Leave space for the arrow that connects dropdown to anchor
    let top = anchor.top + anchor.height + metrics.arrow_height + metrics.border_height
        - viewport.scroll_top;

    Placement {
        top: Offset::Px(top),
        bottom: Offset::Auto,
        max_height: (viewport.height - top - metrics.window_margin).max(0),
        ..*current
    }
}

fn diff(current: &Placement, target: &Placement) -> PlacementPatch {
    PlacementPatch {
        top: (target.top != current.top).then_some(target.top),
        bottom: (target.bottom != current.bottom).then_some(target.bottom),
        left: None,
        width: None,
        max_height: (target.max_height != current.max_height).then_some(target.max_height),
    }
}
