//! Reusable UI widgets

mod anchor_input;
mod dropdown_view;
pub mod list_item;

pub use anchor_input::AnchorInput;
pub use dropdown_view::DropdownView;
pub use list_item::{ListItem, RowEvent};
