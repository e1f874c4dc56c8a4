//! GraphQL commerce API client.
//!
//! # Architecture
//!
//! - Uses `graphql_client` request/response envelopes with hand-written
//!   operations (see [`queries`])
//! - The commerce API is source of truth - NO local sync, direct API calls
//! - In-memory caching via `moka` for product queries, with a lifetime equal
//!   to the configured revalidate interval (60 seconds by default)
//! - Checkout queries and mutations are never cached
//!
//! # Example
//!
//! ```rust,ignore
//! use quickshop_storefront::graphql::GraphqlClient;
//!
//! let client = GraphqlClient::new(&config.graphql);
//!
//! let product = client.get_product_details("blue-hoodie").await?;
//! let checkout = client.create_checkout().await?;
//! client.add_checkout_line(&checkout, &product.variants[0].id).await?;
//! ```

mod cache;
mod client;
mod conversions;
pub mod queries;

pub use client::GraphqlClient;

use thiserror::Error;

/// Errors that can occur when talking to the commerce API.
///
/// Handlers map these onto HTTP statuses in `AppError`: `NotFound` becomes
/// 404, `RateLimited` 503 and everything else 502.
#[derive(Debug, Error)]
pub enum GraphqlError {
    /// Transport failure before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status (other than 429).
    #[error("API returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Top-level `errors` in the response envelope.
    #[error("GraphQL errors: {}", format_api_errors(.0))]
    GraphQL(Vec<ApiError>),

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Neither `data` nor `errors` in the envelope.
    #[error("Empty response to {0}")]
    EmptyResponse(&'static str),

    /// Product or checkout unknown to the API.
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP 429; carries the `Retry-After` seconds.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Mutation `errors` payload (e.g. insufficient stock).
    #[error("User error: {0}")]
    UserError(String),
}

/// One entry of a response's top-level `errors`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub message: String,
    /// Dotted response path, e.g. `product.variants.0`.
    pub path: Option<String>,
}

impl From<graphql_client::Error> for ApiError {
    fn from(error: graphql_client::Error) -> Self {
        let path = error
            .path
            .filter(|fragments| !fragments.is_empty())
            .map(|fragments| {
                fragments
                    .iter()
                    .map(|fragment| match fragment {
                        graphql_client::PathFragment::Key(key) => key.clone(),
                        graphql_client::PathFragment::Index(index) => index.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".")
            });

        Self {
            message: error.message,
            path,
        }
    }
}

fn format_api_errors(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|e| match &e.path {
            Some(path) => format!("{} (at {path})", e.message),
            None => e.message.clone(),
        })
        .collect::<Vec<_>>()
        .join("; ")
}
