//! Item Routes
//!
//! Paths for items nested under a list.

use super::list::{list_path, segment};

pub fn items_path(list_id: &str) -> String {
    format!("{}/items", list_path(list_id))
}

/// Completion toggle and delete
pub fn item_path(list_id: &str, item_id: &str) -> String {
    format!("{}/{}", items_path(list_id), segment(item_id))
}

/// Status / priority / assignee patch
pub fn item_props_path(list_id: &str, item_id: &str) -> String {
    format!("{}/props", item_path(list_id, item_id))
}
