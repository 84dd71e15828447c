//! Items, selection changes and derived row data
//!
//! The caller owns the selected set. These functions compute the *new*
//! selection to report; they never mutate the caller's items.

use serde::{Deserialize, Serialize};

use crate::constants::LIST_ITEM_ID_PREFIX;

/// A selectable entry supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<V> {
    pub value: V,
    pub label: String,
}

impl<V> Item<V> {
    pub fn new(value: V, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Row data derived from an item and the current selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderItem<V> {
    pub class_name: String,
    pub label: String,
    pub selected: bool,
    pub value: V,
}

/// Selection after choosing `value`
///
/// Single-select replaces the selection. Multi-select toggles `value`,
/// keeping the order of the remaining entries and appending new ones.
pub fn select_value<V: Clone + PartialEq>(multiselect: bool, selected: &[V], value: V) -> Vec<V> {
    if !multiselect {
        return vec![value];
    }

    let mut values = selected.to_vec();
    match values.iter().position(|v| *v == value) {
        Some(index) => {
            values.remove(index);
        }
        None => values.push(value),
    }
    values
}

/// Index of the item holding `value`
pub fn index_of<V: PartialEq>(items: &[Item<V>], value: &V) -> Option<usize> {
    items.iter().position(|item| item.value == *value)
}

/// Build row data, marking the rows whose value is selected
pub fn render_items<V: Clone + PartialEq>(items: &[Item<V>], selected: &[V]) -> Vec<RenderItem<V>> {
    items
        .iter()
        .map(|item| {
            let is_selected = selected.contains(&item.value);
            let mut class_name = String::from("list-item");
            if is_selected {
                class_name.push_str(" list-item-selected");
            }
            RenderItem {
                class_name,
                label: item.label.clone(),
                selected: is_selected,
                value: item.value.clone(),
            }
        })
        .collect()
}

/// Whether the empty-state message replaces the list
pub fn show_empty_message<V>(items: &[Item<V>]) -> bool {
    items.is_empty()
}

/// Id of the focused row, referenced by the active-descendant attribute
pub fn active_descendant(focused_index: Option<usize>) -> Option<String> {
    focused_index.map(|index| format!("{}-{}", LIST_ITEM_ID_PREFIX, index))
}
