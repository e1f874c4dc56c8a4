//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                             - Product listing
//! GET  /health                       - Health check
//!
//! # Products
//! GET  /products                     - Product listing
//! GET  /products/{slug}              - Product detail
//! GET  /products/{slug}/quick-add    - Quick-add modal fragment (HTMX)
//! POST /products/{slug}/quick-add    - Add selected variant (204 + HX-Refresh on success)
//!
//! # Assets
//! GET  /static/*                     - Scripts and styles
//! ```

pub mod products;

use axum::{
    Router,
    body::Body,
    http::Request,
    middleware,
    routing::get,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Directory served under `/static`, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
        .route(
            "/{slug}/quick-add",
            get(products::quick_add).post(products::quick_add_submit),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .nest("/products", product_routes())
}

/// Build the complete application: routes, static assets and middleware.
///
/// Sentry layers are added by the binary so tests run without a hub.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the commerce API.
async fn health() -> &'static str {
    "ok"
}
