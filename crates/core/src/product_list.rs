//! Settings handed to the product-list renderer.

use serde::{Deserialize, Serialize};

/// Number of products requested when a shelf does not set `maxItems`.
pub const DEFAULT_MAX_ITEMS: i64 = 10;

/// How the product list advances when paginating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScrollType {
    /// Move a full page of items at a time.
    #[default]
    ByPage,
    /// Move one item at a time.
    OneByOne,
}

/// Product-list renderer configuration, as set in the page editor.
///
/// Every field has a default so a shelf can omit the whole block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductListSettings {
    /// Maximum number of items in the list.
    pub max_items: i64,
    /// Items visible per page on desktop.
    pub items_per_page: u32,
    /// Items visible per page on the narrowest breakpoint.
    pub min_items_per_page: u32,
    /// Pagination step.
    pub scroll: ScrollType,
    /// Whether navigation arrows are shown.
    pub arrows: bool,
    /// Whether the title is shown.
    pub show_title: bool,
    /// Title text.
    pub title_text: Option<String>,
    /// Whether the list wraps around at the ends.
    pub infinite: bool,
}

impl Default for ProductListSettings {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            items_per_page: 5,
            min_items_per_page: 1,
            scroll: ScrollType::ByPage,
            arrows: true,
            show_title: true,
            title_text: None,
            infinite: false,
        }
    }
}
