//! Shelf orchestration.
//!
//! A [`Shelf`] owns one shelf's configuration and its normalization memo. Each
//! render takes the query result and the ambient render context as plain
//! values and returns a [`ShelfView`]; fetching and drawing belong to the caller.
//!
//! # States
//!
//! | Query result            | View                    |
//! |-------------------------|-------------------------|
//! | `loading`               | [`ShelfView::Loading`]  |
//! | not loading, `error`    | [`ShelfView::Hidden`]   |
//! | otherwise               | [`ShelfView::List`]     |

use std::sync::Arc;

use serde::Serialize;

use crate::config::{InstallmentCriteria, PaginationDotsVisibility, ShelfConfig};
use crate::normalize::ProductMemo;
use crate::product::{NormalizedProduct, RawProduct};
use crate::product_list::{DEFAULT_MAX_ITEMS, ProductListSettings};
use crate::query::{QueryOptions, build_query_options};
use crate::tracking::resolve_tracking_id;

/// Result of the products query as seen by the shelf.
#[derive(Debug, Clone, Default)]
pub struct ShelfQueryResult {
    pub loading: bool,
    pub error: Option<String>,
    pub products: Option<Arc<[RawProduct]>>,
}

impl ShelfQueryResult {
    /// Query still in flight.
    #[must_use]
    pub const fn loading() -> Self {
        Self {
            loading: true,
            error: None,
            products: None,
        }
    }

    /// Query failed.
    #[must_use]
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            loading: false,
            error: Some(error.into()),
            products: None,
        }
    }

    /// Query resolved with products.
    #[must_use]
    pub const fn ready(products: Arc<[RawProduct]>) -> Self {
        Self {
            loading: false,
            error: None,
            products: Some(products),
        }
    }
}

/// Ambient values a shelf needs from the page it is rendered on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Whether the visitor is on a mobile device.
    pub is_mobile: bool,
    /// Position of the shelf in the page tree (e.g. `store.home/shelf#deals`).
    pub tree_path: Option<String>,
}

/// Everything the product-list renderer receives.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListProps {
    /// Editor settings, with `maxItems` resolved for this shelf.
    #[serde(flatten)]
    pub settings: ProductListSettings,
    pub is_mobile: bool,
    pub loading: bool,
    pub pagination_dots_visibility: PaginationDotsVisibility,
    pub products: Option<Arc<[NormalizedProduct]>>,
    pub tracking_id: String,
    pub installment_criteria: InstallmentCriteria,
}

impl ProductListProps {
    /// Products to draw (empty when the query returned none).
    #[must_use]
    pub fn products(&self) -> &[NormalizedProduct] {
        self.products.as_deref().unwrap_or_default()
    }
}

/// List-identity wrapper around the product list; analytics events from
/// descendants are grouped under `list_name`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListProvider {
    pub list_name: String,
    pub props: ProductListProps,
}

/// What a shelf renders for one pass.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ShelfView {
    /// Loading indicator only.
    Loading,
    /// Nothing at all.
    Hidden,
    /// The product list inside its list-identity provider.
    List(ProductListProvider),
}

/// One shelf instance.
#[derive(Debug)]
pub struct Shelf {
    config: ShelfConfig,
    memo: ProductMemo,
}

impl Shelf {
    #[must_use]
    pub fn new(config: ShelfConfig) -> Self {
        Self {
            config,
            memo: ProductMemo::new(),
        }
    }

    /// Options for the products query of this shelf.
    #[must_use]
    pub fn query_options(&self) -> QueryOptions {
        build_query_options(&self.config)
    }

    /// Analytics list name of this shelf in the given context.
    #[must_use]
    pub fn tracking_id(&self, ctx: &RenderContext) -> String {
        resolve_tracking_id(self.config.tracking_id.as_deref(), ctx.tree_path.as_deref())
    }

    /// Normalization memo, for inspecting cache behaviour.
    #[must_use]
    pub const fn memo(&self) -> &ProductMemo {
        &self.memo
    }

    /// Render one pass from the current query result.
    pub fn render(&mut self, result: &ShelfQueryResult, ctx: &RenderContext) -> ShelfView {
        if result.loading {
            return ShelfView::Loading;
        }

        if result.error.is_some() {
            return ShelfView::Hidden;
        }

        let products = self.memo.normalize(result.products.as_ref());
        let tracking_id = self.tracking_id(ctx);

        let settings = ProductListSettings {
            max_items: self.config.max_items.unwrap_or(DEFAULT_MAX_ITEMS),
            ..self.config.product_list.clone()
        };

        let props = ProductListProps {
            settings,
            is_mobile: ctx.is_mobile,
            loading: result.loading,
            pagination_dots_visibility: self.config.pagination_dots_visibility,
            products,
            tracking_id: tracking_id.clone(),
            installment_criteria: self.config.installment_criteria.unwrap_or_default(),
        };

        ShelfView::List(ProductListProvider {
            list_name: tracking_id,
            props,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::fixtures::raw_product;

    fn home_context() -> RenderContext {
        RenderContext {
            is_mobile: true,
            tree_path: Some("store.home/shelf#deals".to_string()),
        }
    }

    fn sample_products() -> Arc<[RawProduct]> {
        vec![
            raw_product("1", &[3]),
            raw_product("2", &[0]),
            raw_product("3", &[1]),
        ]
        .into()
    }

    #[test]
    fn test_loading_renders_indicator_without_normalizing() {
        let mut shelf = Shelf::new(ShelfConfig::default());
        let result = ShelfQueryResult {
            loading: true,
            error: None,
            products: Some(sample_products()),
        };

        let view = shelf.render(&result, &home_context());
        assert!(matches!(view, ShelfView::Loading));
        assert!(shelf.memo().is_empty());
        assert_eq!(shelf.memo().computations(), 0);
    }

    #[test]
    fn test_error_renders_nothing() {
        let mut shelf = Shelf::new(ShelfConfig::default());
        let view = shelf.render(&ShelfQueryResult::failed("HTTP 502"), &home_context());
        assert!(matches!(view, ShelfView::Hidden));
        assert!(shelf.memo().is_empty());
    }

    #[test]
    fn test_ready_renders_provider_with_props() {
        let config: ShelfConfig = serde_json::from_value(json!({
            "maxItems": 6,
            "paginationDotsVisibility": "desktopOnly",
            "installmentCriteria": "MAX_WITH_INTEREST",
            "productList": { "itemsPerPage": 3, "titleText": "Deals" }
        }))
        .unwrap();
        let mut shelf = Shelf::new(config);

        let view = shelf.render(&ShelfQueryResult::ready(sample_products()), &home_context());
        let ShelfView::List(provider) = view else {
            panic!("expected a product list");
        };

        assert_eq!(provider.list_name, "shelf#deals");
        let props = provider.props;
        assert_eq!(props.tracking_id, "shelf#deals");
        assert!(props.is_mobile);
        assert!(!props.loading);
        assert_eq!(props.settings.max_items, 6);
        assert_eq!(props.settings.items_per_page, 3);
        assert_eq!(props.settings.title_text.as_deref(), Some("Deals"));
        assert_eq!(
            props.pagination_dots_visibility,
            PaginationDotsVisibility::DesktopOnly
        );
        assert_eq!(
            props.installment_criteria,
            InstallmentCriteria::MaxWithInterest
        );
        let ids: Vec<&str> = props.products().iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_explicit_tracking_id_names_the_list() {
        let config = ShelfConfig {
            tracking_id: Some("summer-sale".to_string()),
            ..ShelfConfig::default()
        };
        let mut shelf = Shelf::new(config);
        let view = shelf.render(&ShelfQueryResult::ready(sample_products()), &home_context());
        let ShelfView::List(provider) = view else {
            panic!("expected a product list");
        };
        assert_eq!(provider.list_name, "summer-sale");
    }

    #[test]
    fn test_ready_without_products() {
        let mut shelf = Shelf::new(ShelfConfig::default());
        let view = shelf.render(&ShelfQueryResult::default(), &RenderContext::default());
        let ShelfView::List(provider) = view else {
            panic!("expected a product list");
        };
        assert!(provider.props.products.is_none());
        assert!(provider.props.products().is_empty());
        assert_eq!(provider.list_name, "List of products");
        assert_eq!(provider.props.settings.max_items, DEFAULT_MAX_ITEMS);
        assert_eq!(
            provider.props.installment_criteria,
            InstallmentCriteria::MaxWithoutInterest
        );
    }

    #[test]
    fn test_repeat_render_reuses_normalized_products() {
        let mut shelf = Shelf::new(ShelfConfig::default());
        let result = ShelfQueryResult::ready(sample_products());
        shelf.render(&result, &home_context());
        shelf.render(&result, &home_context());
        assert_eq!(shelf.memo().computations(), 1);

        shelf.render(&ShelfQueryResult::ready(sample_products()), &home_context());
        assert_eq!(shelf.memo().computations(), 2);
    }

    #[test]
    fn test_view_serialization() {
        let mut shelf = Shelf::new(ShelfConfig::default());
        let view = shelf.render(&ShelfQueryResult::ready(sample_products()), &home_context());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["state"], json!("list"));
        assert_eq!(json["listName"], json!("shelf#deals"));
        assert_eq!(json["props"]["maxItems"], json!(10));
        assert_eq!(json["props"]["paginationDotsVisibility"], json!("visible"));
        assert_eq!(json["props"]["products"].as_array().unwrap().len(), 2);

        let hidden = serde_json::to_value(ShelfView::Hidden).unwrap();
        assert_eq!(hidden, json!({ "state": "hidden" }));
    }
}
