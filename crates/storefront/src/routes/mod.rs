//! HTTP route handlers for the shelf storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Shelves
//! GET  /shelves                - Configured shelves and their query options (JSON)
//! GET  /shelves/{name}         - Shelf fragment (HTML, HTMX friendly)
//! GET  /api/shelves/{name}     - Shelf view (JSON)
//! ```
//!
//! Shelf routes accept `?lazy=true` (render the loading indicator only) and
//! `?device=mobile|desktop` (override User-Agent detection).

pub mod shelves;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the shelf routes router.
pub fn shelf_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(shelves::index))
        .route("/{name}", get(shelves::show))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/shelves", shelf_routes())
        .route("/api/shelves/{name}", get(shelves::show_json))
}

/// Build the application with state and request tracing applied.
pub fn app(state: AppState) -> Router {
    routes().with_state(state).layer(TraceLayer::new_for_http())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}
