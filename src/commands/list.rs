//! List Routes
//!
//! Query arguments and paths for `/api/lists`.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;

use crate::models::normalize_text;

pub const LISTS_PATH: &str = "/api/lists";

// ========================
// Argument Structs
// ========================

/// Filters for `GET /api/lists`; absent filters are not sent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
}

impl ListQuery {
    /// Build from raw view-state text; blank filters are dropped.
    pub fn from_filters(category: &str, search: &str) -> Self {
        Self {
            categoria: normalize_text(category),
            q: normalize_text(search),
        }
    }
}

#[derive(Serialize)]
pub(crate) struct CompletionArgs {
    pub completado: bool,
}

// ========================
// Paths
// ========================

pub(crate) fn segment(id: &str) -> String {
    utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
}

pub fn list_path(list_id: &str) -> String {
    format!("{}/{}", LISTS_PATH, segment(list_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_drops_blank_filters() {
        let query = ListQuery::from_filters("  ", " leche ");
        assert_eq!(query.categoria, None);
        assert_eq!(query.q.as_deref(), Some("leche"));
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            serde_json::json!({ "q": "leche" })
        );
    }

    #[test]
    fn test_list_path_encodes_id() {
        assert_eq!(list_path("65f0c2"), "/api/lists/65f0c2");
        assert_eq!(list_path("a/b"), "/api/lists/a%2Fb");
    }
}
