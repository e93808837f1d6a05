//! Integration tests for the shelf storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shelf-integration-tests
//! ```
//!
//! Each test starts a mocked product search (`wiremock`) and a storefront
//! bound to an ephemeral port, then talks to it over HTTP with `reqwest`.

use std::net::SocketAddr;

use serde_json::{Value, json};
use shelf_storefront::config::CatalogConfig;
use shelf_storefront::routes;
use shelf_storefront::shelves::ShelfRegistry;
use shelf_storefront::state::AppState;
use url::Url;
use wiremock::MockServer;

/// Shelves served by every test storefront.
pub const TEST_SHELVES: &str = r"
shelves:
  - name: deals
    treePath: store.home/shelf#deals
    config:
      category: 25
      maxItems: 3
      productList:
        titleText: Deals
  - name: campaign
    config:
      trackingId: summer-sale
      maxItems: 2
  - name: empty
    config:
      maxItems: 0
";

/// A running storefront and its mocked product search.
pub struct TestContext {
    pub client: reqwest::Client,
    pub base_url: String,
    pub search: MockServer,
}

impl TestContext {
    /// Start a mocked search and a storefront serving [`TEST_SHELVES`].
    ///
    /// # Panics
    ///
    /// Panics if the storefront cannot be started.
    #[allow(clippy::unwrap_used)]
    pub async fn new() -> Self {
        let search = MockServer::start().await;
        let endpoint = Url::parse(&format!("{}/graphql", search.uri())).unwrap();
        let shelves = ShelfRegistry::from_yaml(TEST_SHELVES).unwrap();
        let state = AppState::new(&CatalogConfig::new(endpoint), shelves);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr: SocketAddr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, routes::app(state)).await.unwrap();
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            search,
        }
    }

    /// URL of a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// A search product with one SKU whose sellers have the given stock.
#[must_use]
pub fn search_product(id: &str, quantities: &[i64]) -> Value {
    let sellers: Vec<Value> = quantities
        .iter()
        .enumerate()
        .map(|(i, quantity)| {
            json!({
                "sellerId": format!("seller-{i}"),
                "commertialOffer": {
                    "Price": 49.9,
                    "ListPrice": 59.9,
                    "AvailableQuantity": quantity,
                    "Installments": [
                        { "Value": 16.63, "InterestRate": 0.0, "TotalValuePlusInterestRate": 49.9, "NumberOfInstallments": 3 }
                    ]
                }
            })
        })
        .collect();

    json!({
        "productId": id,
        "productName": format!("Product {id}"),
        "linkText": format!("product-{id}"),
        "items": [{
            "itemId": format!("{id}-1"),
            "name": "Default",
            "images": [{ "imageUrl": format!("https://cdn.example.com/{id}.jpg") }],
            "sellers": sellers
        }]
    })
}

/// A successful search response.
#[must_use]
pub fn products_response(products: Vec<Value>) -> Value {
    json!({ "data": { "products": products } })
}
