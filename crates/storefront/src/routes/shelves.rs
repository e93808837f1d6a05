//! Shelf route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use shelf_core::{
    InstallmentCriteria, NormalizedProduct, ProductListProvider, QueryOptions, ScrollType,
    ShelfQueryResult, ShelfView,
};
use tracing::instrument;

use crate::device::Device;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Shelf rendering query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct ShelfQuery {
    /// Render the loading indicator and let the client fetch the shelf.
    #[serde(default)]
    pub lazy: bool,
    /// Override device detection.
    pub device: Option<Device>,
}

/// Product tile display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub link: String,
    pub image_url: String,
    pub image_alt: String,
    pub price: String,
    pub list_price: Option<String>,
    pub installment: Option<String>,
}

impl ProductCardView {
    fn new(product: &NormalizedProduct, criteria: InstallmentCriteria) -> Self {
        let sku = &product.sku;
        let (image_url, image_alt) = sku
            .image
            .as_ref()
            .map(|i| (i.url.clone(), i.alt.clone()))
            .unwrap_or_default();

        let installment = product
            .installment(criteria)
            .filter(|i| i.count > 1)
            .map(|i| {
                if i.is_interest_free() {
                    format!("{}x {:.2} interest free", i.count, i.value)
                } else {
                    format!("{}x {:.2}", i.count, i.value)
                }
            });

        Self {
            id: product.product_id.clone(),
            name: product.product_name.clone(),
            brand: product.brand.clone().unwrap_or_default(),
            link: product.link.clone(),
            image_url,
            image_alt,
            price: format!("{:.2}", sku.price),
            list_price: sku.has_discount().then(|| format!("{:.2}", sku.list_price)),
            installment,
        }
    }
}

/// Product list fragment.
#[derive(Template, WebTemplate)]
#[template(path = "shelves/list.html")]
pub struct ShelfListTemplate {
    pub name: String,
    pub list_name: String,
    pub title: String,
    pub show_title: bool,
    pub products: Vec<ProductCardView>,
    pub items_per_page: u32,
    pub scroll: &'static str,
    pub arrows: bool,
    pub infinite: bool,
    pub is_mobile: bool,
    pub dots: usize,
}

impl ShelfListTemplate {
    fn new(name: &str, provider: &ProductListProvider) -> Self {
        let props = &provider.props;
        let settings = &props.settings;
        let products: Vec<ProductCardView> = props
            .products()
            .iter()
            .map(|p| ProductCardView::new(p, props.installment_criteria))
            .collect();

        let dots = if props.pagination_dots_visibility.shows_on(props.is_mobile) {
            page_count(products.len(), settings.items_per_page)
        } else {
            0
        };

        Self {
            name: name.to_string(),
            list_name: provider.list_name.clone(),
            title: settings.title_text.clone().unwrap_or_default(),
            show_title: settings.show_title && settings.title_text.is_some(),
            products,
            items_per_page: settings.items_per_page,
            scroll: match settings.scroll {
                ScrollType::ByPage => "BY_PAGE",
                ScrollType::OneByOne => "ONE_BY_ONE",
            },
            arrows: settings.arrows,
            infinite: settings.infinite,
            is_mobile: props.is_mobile,
            dots,
        }
    }
}

/// Loading indicator fragment. HTMX replaces it with the rendered shelf.
#[derive(Template, WebTemplate)]
#[template(path = "shelves/loading.html")]
pub struct ShelfLoadingTemplate {
    pub name: String,
    pub src: String,
}

/// Number of pagination dots for `len` items.
fn page_count(len: usize, items_per_page: u32) -> usize {
    let per_page = usize::try_from(items_per_page).unwrap_or(usize::MAX).max(1);
    if len <= per_page { 0 } else { len.div_ceil(per_page) }
}

/// Configured shelf summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfSummary {
    pub name: String,
    pub tree_path: Option<String>,
    pub query: QueryOptions,
}

/// Render a shelf's view for this request.
async fn resolve_view(
    state: &AppState,
    name: &str,
    query: &ShelfQuery,
    headers: &HeaderMap,
) -> Result<ShelfView> {
    let entry = state
        .shelves()
        .get(name)
        .ok_or_else(|| AppError::NotFound(format!("shelf {name}")))?;

    let device = Device::resolve(query.device, headers);
    let ctx = entry.context(device.is_mobile());

    let result = if query.lazy {
        ShelfQueryResult::loading()
    } else {
        state.catalog().fetch_shelf(&entry.query_options()).await
    };

    entry
        .render(&result, &ctx)
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// List configured shelves with their query options.
pub async fn index(State(state): State<AppState>) -> Json<Vec<ShelfSummary>> {
    let shelves = state
        .shelves()
        .iter()
        .map(|entry| ShelfSummary {
            name: entry.name().to_string(),
            tree_path: entry.tree_path().map(str::to_string),
            query: entry.query_options(),
        })
        .collect();

    Json(shelves)
}

/// Render a shelf as an HTML fragment.
///
/// A failed query renders an empty fragment.
#[instrument(skip(state, headers))]
pub async fn show(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ShelfQuery>,
    headers: HeaderMap,
) -> Result<Response> {
    let view = resolve_view(&state, &name, &query, &headers).await?;

    let response = match view {
        ShelfView::Loading => {
            let src = query.device.map_or_else(
                || format!("/shelves/{name}"),
                |d| format!("/shelves/{name}?device={}", d.as_str()),
            );
            ShelfLoadingTemplate { name, src }.into_response()
        }
        ShelfView::Hidden => Html("").into_response(),
        ShelfView::List(provider) => ShelfListTemplate::new(&name, &provider).into_response(),
    };

    Ok(response)
}

/// Render a shelf as JSON.
#[instrument(skip(state, headers))]
pub async fn show_json(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<ShelfQuery>,
    headers: HeaderMap,
) -> Result<Json<ShelfView>> {
    resolve_view(&state, &name, &query, &headers).await.map(Json)
}
