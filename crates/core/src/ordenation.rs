//! Sort orders accepted by the product search.
//!
//! [`OrderBy`] is the only place the valid `orderBy` tokens are listed. Config
//! deserialization and the page-builder schema both read from [`OrderBy::ALL`],
//! so the two can never drift apart.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A product sort order, serialized as its wire token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderBy {
    /// Search relevance (empty token).
    #[serde(rename = "")]
    Relevance,
    /// Best sellers first.
    #[default]
    #[serde(rename = "OrderByTopSaleDESC")]
    TopSaleDesc,
    /// Newest releases first.
    #[serde(rename = "OrderByReleaseDateDESC")]
    ReleaseDateDesc,
    /// Largest discount first.
    #[serde(rename = "OrderByBestDiscountDESC")]
    BestDiscountDesc,
    /// Most expensive first.
    #[serde(rename = "OrderByPriceDESC")]
    PriceDesc,
    /// Cheapest first.
    #[serde(rename = "OrderByPriceASC")]
    PriceAsc,
    /// Name, A to Z.
    #[serde(rename = "OrderByNameASC")]
    NameAsc,
    /// Name, Z to A.
    #[serde(rename = "OrderByNameDESC")]
    NameDesc,
}

impl OrderBy {
    /// Every sort order, in the order shown to editors.
    pub const ALL: [Self; 8] = [
        Self::Relevance,
        Self::TopSaleDesc,
        Self::ReleaseDateDesc,
        Self::BestDiscountDesc,
        Self::PriceDesc,
        Self::PriceAsc,
        Self::NameAsc,
        Self::NameDesc,
    ];

    /// The token sent to the search API.
    #[must_use]
    pub const fn wire_value(self) -> &'static str {
        match self {
            Self::Relevance => "",
            Self::TopSaleDesc => "OrderByTopSaleDESC",
            Self::ReleaseDateDesc => "OrderByReleaseDateDESC",
            Self::BestDiscountDesc => "OrderByBestDiscountDESC",
            Self::PriceDesc => "OrderByPriceDESC",
            Self::PriceAsc => "OrderByPriceASC",
            Self::NameAsc => "OrderByNameASC",
            Self::NameDesc => "OrderByNameDESC",
        }
    }

    /// Message key used by the page-builder to label this option.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Relevance => "admin/editor.shelf.ordination.relevance",
            Self::TopSaleDesc => "admin/editor.shelf.ordination.sales",
            Self::ReleaseDateDesc => "admin/editor.shelf.ordination.date",
            Self::BestDiscountDesc => "admin/editor.shelf.ordination.discount",
            Self::PriceDesc => "admin/editor.shelf.ordination.price.descending",
            Self::PriceAsc => "admin/editor.shelf.ordination.price.ascending",
            Self::NameAsc => "admin/editor.shelf.ordination.name.ascending",
            Self::NameDesc => "admin/editor.shelf.ordination.name.descending",
        }
    }
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

impl FromStr for OrderBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|order| order.wire_value() == s)
            .ok_or_else(|| format!("invalid sort order: {s}"))
    }
}

/// Wire values of every sort order.
#[must_use]
pub fn ordenation_values() -> Vec<&'static str> {
    OrderBy::ALL.iter().map(|o| o.wire_value()).collect()
}

/// Page-builder labels of every sort order, aligned with [`ordenation_values`].
#[must_use]
pub fn ordenation_labels() -> Vec<&'static str> {
    OrderBy::ALL.iter().map(|o| o.label()).collect()
}
