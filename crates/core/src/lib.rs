//! Shelf Core - product shelf logic shared by the storefront and CLI.
//!
//! A shelf is a queried, paginated row of products rendered as one page unit.
//! This crate turns an editor's shelf configuration into search variables,
//! normalizes the products that come back, and decides what a shelf renders.
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients. The query itself is executed by the caller, which hands the result
//! back to [`Shelf::render`].
//!
//! # Modules
//!
//! - [`ordenation`] - Sort orders accepted by the search
//! - [`config`] - Editorial shelf configuration
//! - [`product_list`] - Product-list renderer settings
//! - [`query`] - Search variables built from a configuration
//! - [`product`] - Raw and normalized product records
//! - [`normalize`] - Buyable filtering and the normalization memo
//! - [`tracking`] - Analytics list name resolution
//! - [`shelf`] - Render state machine
//! - [`editorial`] - Shelves file
//! - [`schema`] - Page-builder schema and load-time validation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod editorial;
pub mod normalize;
pub mod ordenation;
pub mod product;
pub mod product_list;
pub mod query;
pub mod schema;
pub mod shelf;
pub mod tracking;

#[cfg(test)]
mod fixtures;

pub use config::{
    CatalogFilter, InstallmentCriteria, LooseBool, PaginationDotsVisibility, ShelfConfig,
    SpecificationFilter,
};
pub use editorial::{EditorialError, ShelfDefinition, ShelvesFile};
pub use normalize::{ProductMemo, normalize_buyable, normalize_products};
pub use ordenation::{OrderBy, ordenation_labels, ordenation_values};
pub use product::{NormalizedProduct, NormalizedSku, RawProduct};
pub use product_list::{DEFAULT_MAX_ITEMS, ProductListSettings, ScrollType};
pub use query::{QueryOptions, QueryVariables, build_query_options, build_query_variables};
pub use schema::{ComponentSchema, SchemaError, SchemaWarning, component_schema, validate};
pub use shelf::{
    ProductListProps, ProductListProvider, RenderContext, Shelf, ShelfQueryResult, ShelfView,
};
pub use tracking::{DEFAULT_LIST_NAME, resolve_tracking_id};
