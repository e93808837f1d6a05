//! Application state shared across handlers.

use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::config::CatalogConfig;
use crate::shelves::ShelfRegistry;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// product search client and the configured shelves.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: CatalogClient,
    shelves: ShelfRegistry,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(catalog: &CatalogConfig, shelves: ShelfRegistry) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                catalog: CatalogClient::new(catalog),
                shelves,
            }),
        }
    }

    /// Get a reference to the product search client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the configured shelves.
    #[must_use]
    pub fn shelves(&self) -> &ShelfRegistry {
        &self.inner.shelves
    }
}
