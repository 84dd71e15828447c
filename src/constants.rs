//! Widget-wide constants
//!
//! Geometry values are in host units: pixels for a browser-style host,
//! cells for the terminal host. The defaults below are the pixel values.

/// Height of the border drawn around the dropdown list
pub const BORDER_HEIGHT: i32 = 1;

/// Height of the arrow connecting the dropdown to its anchor
pub const ARROW_HEIGHT: i32 = 12;

/// Width of the arrow connecting the dropdown to its anchor
pub const ARROW_WIDTH: i32 = 25;

/// Space kept between the dropdown and the viewport edge
pub const WINDOW_MARGIN: i32 = 20;

/// Update loop frame interval in microseconds (60 frames per second)
pub const FRAME_INTERVAL_US: u64 = 16_667;

/// Inactivity window after which the update loop stops, in milliseconds
pub const SETTLE_WINDOW_MS: u64 = 250;

/// Ellipsis appended to truncated labels
pub const ELLIPSIS: &str = "…";

/// Message shown when there are no items to list
pub const EMPTY_MESSAGE: &str = "No search results";

/// Prefix of the row id referenced by the active-descendant attribute
pub const LIST_ITEM_ID_PREFIX: &str = "select-list-item";

/// ARIA role carried by every row
pub const LIST_ITEM_ROLE: &str = "option";

/// Maximum length for filter text (prevents memory exhaustion)
pub const MAX_FILTER_LENGTH: usize = 100;

/// Event poll timeout in milliseconds when the update loop is idle
pub const EVENT_POLL_TIMEOUT_MS: u64 = 100;
