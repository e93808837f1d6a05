//! Analytics list name resolution.

/// List name used when neither a tracking id nor a page-tree segment is available.
pub const DEFAULT_LIST_NAME: &str = "List of products";

/// Resolve the analytics list name of a shelf.
///
/// An explicit, non-empty tracking id wins. Otherwise the last `/` segment of
/// the shelf's page-tree path is used (e.g. `store.home/shelf#deals` →
/// `shelf#deals`). A missing path (absent or not a string where it came from),
/// an empty path, or an empty last segment falls back to [`DEFAULT_LIST_NAME`].
#[must_use]
pub fn resolve_tracking_id(explicit: Option<&str>, tree_path: Option<&str>) -> String {
    if let Some(id) = explicit.filter(|id| !id.is_empty()) {
        return id.to_string();
    }

    tree_path
        .and_then(|path| path.rsplit('/').next())
        .filter(|segment| !segment.is_empty())
        .unwrap_or(DEFAULT_LIST_NAME)
        .to_string()
}
