//! Label text: highlighting, truncation and the post-render pass

pub mod highlight;
pub mod pass;
pub mod truncate;

pub use highlight::{highlight, FilterMode, Highlighted, Segment};
pub use pass::{RowText, TextPass};
pub use truncate::{truncate, Truncated};
