//! Anchored select dropdown and list item widgets for terminal UIs
//!
//! [`dropdown::Dropdown`] positions a list above or below its anchor and
//! keeps it there while the page scrolls or the window resizes.
//! [`ui::widgets::ListItem`] draws one selectable row with the filter text
//! emphasized.

pub mod app;
pub mod config;
pub mod constants;
pub mod dropdown;
pub mod error;
pub mod paths;
pub mod text;
pub mod ui;
