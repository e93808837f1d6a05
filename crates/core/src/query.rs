//! Translation of a [`ShelfConfig`] into product search variables.
//!
//! The search uses window pagination: a shelf always asks for the absolute
//! range `[0, maxItems - 1]` and never pages further on its own.

use serde::{Deserialize, Serialize};

use crate::config::{CatalogFilter, InstallmentCriteria, ShelfConfig, SpecificationFilter};
use crate::ordenation::OrderBy;
use crate::product_list::DEFAULT_MAX_ITEMS;

/// Variables of the products query.
///
/// `category`, `collection`, `skusFilter` and `installmentCriteria` are left
/// out of the serialized form when unset; the search treats a missing key as
/// "no filter", which is not the same as sending `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryVariables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    pub specification_filters: Vec<String>,
    pub order_by: OrderBy,
    pub from: i64,
    pub to: i64,
    pub hide_unavailable_items: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skus_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment_criteria: Option<InstallmentCriteria>,
}

impl QueryVariables {
    /// Whether the window cannot contain any product (`maxItems <= 0`).
    #[must_use]
    pub const fn is_empty_window(&self) -> bool {
        self.to < self.from
    }
}

/// Query variables plus transport hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    /// Resolve the query during server-side rendering. Always set for shelves.
    pub ssr: bool,
    pub variables: QueryVariables,
}

/// Serialize a specification filter as `specificationFilter_<id>:<value>`.
#[must_use]
pub fn specification_filter_param(filter: &SpecificationFilter) -> String {
    format!("specificationFilter_{}:{}", filter.id, filter.value)
}

fn catalog_param(filter: Option<&CatalogFilter>) -> Option<String> {
    filter.filter(|f| f.is_set()).map(CatalogFilter::to_wire)
}

/// Build the products query variables for a shelf.
///
/// Never fails: every field has a default, and a non-positive `maxItems`
/// simply yields an empty window.
#[must_use]
pub fn build_query_variables(config: &ShelfConfig) -> QueryVariables {
    let max_items = config.max_items.unwrap_or(DEFAULT_MAX_ITEMS);

    QueryVariables {
        category: catalog_param(config.category.as_ref()),
        collection: catalog_param(config.collection.as_ref()),
        specification_filters: config
            .specification_filters
            .iter()
            .map(specification_filter_param)
            .collect(),
        order_by: config.order_by.unwrap_or_default(),
        from: 0,
        to: max_items.saturating_sub(1),
        hide_unavailable_items: config
            .hide_unavailable_items
            .as_ref()
            .is_some_and(|flag| flag.coerce()),
        skus_filter: config.skus_filter.clone(),
        installment_criteria: config.installment_criteria,
    }
}

/// Build the full query options (variables plus the SSR hint) for a shelf.
#[must_use]
pub fn build_query_options(config: &ShelfConfig) -> QueryOptions {
    QueryOptions {
        ssr: true,
        variables: build_query_variables(config),
    }
}
