use std::fmt;

use serde::Serialize;

/// Cache identity of one filtered, paginated listing.
///
/// Derived from its inputs only. Two queries with equal keys share one cache entry; changing any
/// component, including the page size, starts a fresh paginated session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SearchQueryKey {
    pub logical_key: String,
    pub search_term: String,
    pub page_size: usize,
    pub scope_id: Option<String>,
}

/// `search_term` is expected to be debounced already.
pub fn compute_key(logical_key: &str, search_term: &str, page_size: usize, scope_id: Option<&str>) -> SearchQueryKey {
    SearchQueryKey {
        logical_key: logical_key.to_string(),
        search_term: search_term.to_string(),
        page_size,
        scope_id: scope_id.map(str::to_string),
    }
}

impl SearchQueryKey {
    /// Stable string form, e.g. `["workflows","flux",20,null]`.
    pub fn cache_string(&self) -> String {
        let tuple = (&self.logical_key, &self.search_term, self.page_size, &self.scope_id);
        serde_json::to_string(&tuple).unwrap_or_else(|_| {
            format!("[{:?},{:?},{},{:?}]", self.logical_key, self.search_term, self.page_size, self.scope_id)
        })
    }
}

impl fmt::Display for SearchQueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.cache_string())
    }
}
