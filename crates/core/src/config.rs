//! Editorial configuration of a single shelf.
//!
//! [`ShelfConfig`] mirrors what an editor sets in the page builder. Values are
//! kept as loosely typed as the editor allows (string-or-number ids, boolean-like
//! flags); the query builder decides how each one reaches the search API.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ordenation::OrderBy;
use crate::product_list::ProductListSettings;

/// Category or collection id, entered either as text or as a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogFilter {
    Text(String),
    Number(serde_json::Number),
}

impl CatalogFilter {
    /// Whether the filter is actually set.
    ///
    /// Empty text and zero do not count as a filter.
    #[must_use]
    pub fn is_set(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        }
    }

    /// String form sent to the search API.
    #[must_use]
    pub fn to_wire(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CatalogFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => {
                if n.is_i64() || n.is_u64() {
                    write!(f, "{n}")
                } else {
                    // f64 Display drops a trailing ".0", matching how editors type ids
                    write!(f, "{}", n.as_f64().unwrap_or_default())
                }
            }
        }
    }
}

impl From<&str> for CatalogFilter {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for CatalogFilter {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

/// A flag that editors may enter as a boolean or as text.
///
/// Only a real `true` or the exact string `"true"` counts as true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LooseBool(serde_json::Value);

impl LooseBool {
    #[must_use]
    pub const fn new(value: serde_json::Value) -> Self {
        Self(value)
    }

    /// Strict coercion: booleans pass through, `"true"` is true, anything else is false.
    #[must_use]
    pub fn coerce(&self) -> bool {
        match &self.0 {
            serde_json::Value::Bool(b) => *b,
            serde_json::Value::String(s) => s == "true",
            _ => false,
        }
    }
}

impl From<bool> for LooseBool {
    fn from(value: bool) -> Self {
        Self(serde_json::Value::Bool(value))
    }
}

impl From<&str> for LooseBool {
    fn from(value: &str) -> Self {
        Self(serde_json::Value::String(value.to_string()))
    }
}

/// A product specification filter (e.g. `{ id: "20", value: "Blue" }`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecificationFilter {
    pub id: String,
    pub value: String,
}

impl SpecificationFilter {
    #[must_use]
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }
}

/// Which installment option the price display prefers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstallmentCriteria {
    /// Most installments that carry no interest.
    #[default]
    MaxWithoutInterest,
    /// Most installments, interest allowed.
    MaxWithInterest,
}

impl InstallmentCriteria {
    pub const ALL: [Self; 2] = [Self::MaxWithoutInterest, Self::MaxWithInterest];

    #[must_use]
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::MaxWithoutInterest => "MAX_WITHOUT_INTEREST",
            Self::MaxWithInterest => "MAX_WITH_INTEREST",
        }
    }
}

/// Where the pagination dots under the shelf are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PaginationDotsVisibility {
    #[default]
    Visible,
    Hidden,
    MobileOnly,
    DesktopOnly,
}

impl PaginationDotsVisibility {
    pub const ALL: [Self; 4] = [
        Self::Visible,
        Self::Hidden,
        Self::MobileOnly,
        Self::DesktopOnly,
    ];

    #[must_use]
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
            Self::MobileOnly => "mobileOnly",
            Self::DesktopOnly => "desktopOnly",
        }
    }

    /// Whether the dots show on the given device.
    #[must_use]
    pub const fn shows_on(self, is_mobile: bool) -> bool {
        match self {
            Self::Visible => true,
            Self::Hidden => false,
            Self::MobileOnly => is_mobile,
            Self::DesktopOnly => !is_mobile,
        }
    }
}

/// Configuration of one shelf.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ShelfConfig {
    /// Category id to search in.
    pub category: Option<CatalogFilter>,
    /// Collection (product cluster) id to search in.
    pub collection: Option<CatalogFilter>,
    /// Hide items that cannot be bought right now.
    pub hide_unavailable_items: Option<LooseBool>,
    /// Sort order; top sellers when unset.
    pub order_by: Option<OrderBy>,
    /// Specification filters, applied in order.
    pub specification_filters: Vec<SpecificationFilter>,
    /// Number of products to request; the product-list default when unset.
    pub max_items: Option<i64>,
    /// Which SKUs of each product to return (e.g. `ALL_AVAILABLE`).
    pub skus_filter: Option<String>,
    /// Installment display preference.
    pub installment_criteria: Option<InstallmentCriteria>,
    /// Analytics list name; derived from the page tree when unset.
    pub tracking_id: Option<String>,
    /// Pagination dots visibility.
    pub pagination_dots_visibility: PaginationDotsVisibility,
    /// Product-list renderer settings.
    pub product_list: ProductListSettings,
}
