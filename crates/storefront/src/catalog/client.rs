//! Product search client implementation.
//!
//! Uses `graphql_client` for the query envelope with `reqwest` 0.13 for HTTP.
//! Product windows are cached using `moka` (TTL from configuration).

use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use shelf_core::{QueryOptions, QueryVariables, RawProduct, ShelfQueryResult};
use tracing::{debug, instrument};
use url::Url;

use super::queries::ShelfProducts;
use super::{CatalogError, GraphQLError};
use crate::config::CatalogConfig;

const CACHE_CAPACITY: u64 = 1000;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the product search.
///
/// Product windows are cached per query variables. A cache hit returns the
/// same `Arc` as the original fetch, so a shelf's normalization memo is hit
/// too.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: Url,
    api_token: Option<SecretString>,
    cache: Cache<String, Arc<[RawProduct]>>,
}

impl CatalogClient {
    /// Create a new search client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(config.cache_ttl)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint: config.endpoint.clone(),
                api_token: config.api_token.clone(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL query.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, CatalogError> {
        let request_body = Q::build_query(variables);

        let mut request = self
            .inner
            .client
            .post(self.inner.endpoint.clone())
            .header("Content-Type", "application/json")
            .json(&request_body);

        if let Some(token) = &self.inner.api_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Product search returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: response_text.chars().take(200).collect(),
            });
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse product search response"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            debug!(errors = ?errors, "GraphQL errors in response");
            return Err(CatalogError::GraphQL(
                errors.into_iter().map(GraphQLError::from).collect(),
            ));
        }

        response.data.ok_or(CatalogError::NoData)
    }

    /// Get the products of one shelf window.
    ///
    /// An empty window (`to < from`) resolves to no products without a
    /// request. A `null` product list counts as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the search reports errors.
    #[instrument(skip(self, variables), fields(order_by = %variables.order_by, to = variables.to))]
    pub async fn products(
        &self,
        variables: &QueryVariables,
    ) -> Result<Arc<[RawProduct]>, CatalogError> {
        let cache_key = serde_json::to_string(variables)?;

        if let Some(products) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let products: Arc<[RawProduct]> = if variables.is_empty_window() {
            debug!("Empty window, skipping request");
            Arc::from(Vec::new())
        } else {
            let data = self.execute::<ShelfProducts>(variables.clone()).await?;
            data.products.unwrap_or_default().into()
        };

        self.inner
            .cache
            .insert(cache_key, Arc::clone(&products))
            .await;

        Ok(products)
    }

    /// Resolve a shelf query into the result a shelf renders from.
    ///
    /// Failures are logged and turned into a failed result.
    pub async fn fetch_shelf(&self, options: &QueryOptions) -> ShelfQueryResult {
        match self.products(&options.variables).await {
            Ok(products) => ShelfQueryResult::ready(products),
            Err(e) => {
                tracing::warn!(error = %e, "Shelf products query failed");
                ShelfQueryResult::failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;
    use shelf_core::{ShelfConfig, build_query_options};
    use wiremock::matchers::{body_partial_json, header, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn client_for(server: &MockServer) -> CatalogClient {
        let endpoint = Url::parse(&format!("{}/graphql", server.uri())).unwrap();
        CatalogClient::new(&CatalogConfig::new(endpoint))
    }

    fn options(max_items: i64) -> QueryOptions {
        build_query_options(&ShelfConfig {
            max_items: Some(max_items),
            ..ShelfConfig::default()
        })
    }

    fn products_body() -> serde_json::Value {
        json!({
            "data": {
                "products": [{
                    "productId": "1",
                    "productName": "Canvas Tote",
                    "linkText": "canvas-tote",
                    "items": [{
                        "itemId": "1-1",
                        "name": "Canvas Tote",
                        "sellers": [{
                            "sellerId": "1",
                            "commertialOffer": { "Price": 25.0, "ListPrice": 30.0, "AvailableQuantity": 2 }
                        }]
                    }]
                }]
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_ready_and_cached() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({
                "operationName": "Products",
                "variables": { "from": 0, "to": 2 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let first = client.fetch_shelf(&options(3)).await;
        let second = client.fetch_shelf(&options(3)).await;

        assert!(!first.loading);
        assert!(first.error.is_none());
        let (a, b) = (first.products.unwrap(), second.products.unwrap());
        assert_eq!(a.len(), 1);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn test_graphql_errors_fail_the_shelf() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": null,
                "errors": [{ "message": "Invalid collection" }]
            })))
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_shelf(&options(5)).await;
        assert!(!result.loading);
        assert!(result.products.is_none());
        assert!(result.error.unwrap().contains("Invalid collection"));
    }

    #[tokio::test]
    async fn test_http_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let err = client_for(&server).products(&options(5).variables).await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "7"))
            .mount(&server)
            .await;

        let err = client_for(&server).products(&options(5).variables).await.unwrap_err();
        assert!(matches!(err, CatalogError::RateLimited(7)));
    }

    #[tokio::test]
    async fn test_empty_window_skips_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
            .expect(0)
            .mount(&server)
            .await;

        let result = client_for(&server).fetch_shelf(&options(0)).await;
        assert!(result.error.is_none());
        assert!(result.products.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_null_products_are_empty() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "products": null } })),
            )
            .mount(&server)
            .await;

        let products = client_for(&server).products(&options(5).variables).await.unwrap();
        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(header("Authorization", "Bearer k7Qp2xVz9LmR4tWb"))
            .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
            .expect(1)
            .mount(&server)
            .await;

        let endpoint = Url::parse(&format!("{}/graphql", server.uri())).unwrap();
        let config = CatalogConfig {
            api_token: Some(SecretString::from("k7Qp2xVz9LmR4tWb")),
            ..CatalogConfig::new(endpoint)
        };
        let result = CatalogClient::new(&config).fetch_shelf(&options(2)).await;
        assert!(result.error.is_none());
    }
}
