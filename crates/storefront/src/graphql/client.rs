//! Commerce API client implementation.
//!
//! Uses `graphql_client` envelopes with `reqwest` 0.13 for HTTP.
//! Caches product queries using `moka` (revalidate interval as TTL).

use std::sync::Arc;

use graphql_client::{GraphQLQuery, Response};
use moka::future::Cache;
use quickshop_core::{CheckoutId, ProductDetail, ProductSummary, VariantId};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use super::cache::{CacheKey, CacheValue};
use super::conversions::{convert_product_detail, convert_product_list, format_user_errors};
use super::queries::{
    CheckoutAddLine, CheckoutCreate, CheckoutFind, ProductDetails, ProductList, checkout_add_line,
    checkout_create, checkout_find, product_details, product_list,
};
use super::{ApiError, GraphqlError};
use crate::checkout::CheckoutResolver;
use crate::config::GraphqlConfig;
use crate::quick_add::QuickAddBackend;

/// Longest response excerpt written to logs.
const LOG_BODY_LIMIT: usize = 500;

// =============================================================================
// GraphqlClient
// =============================================================================

/// Client for the GraphQL commerce API.
///
/// Provides typed access to product queries and checkout mutations.
/// Product queries are cached for the configured revalidate interval.
#[derive(Clone)]
pub struct GraphqlClient {
    inner: Arc<GraphqlClientInner>,
}

struct GraphqlClientInner {
    client: reqwest::Client,
    endpoint: String,
    channel: String,
    auth_token: Option<SecretString>,
    cache: Cache<CacheKey, CacheValue>,
}

impl GraphqlClient {
    /// Create a new commerce API client.
    #[must_use]
    pub fn new(config: &GraphqlConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(config.revalidate)
            .build();

        Self {
            inner: Arc::new(GraphqlClientInner {
                client: reqwest::Client::new(),
                endpoint: config.api_url.to_string(),
                channel: config.channel.clone(),
                auth_token: config.auth_token.clone(),
                cache,
            }),
        }
    }

    /// Execute a GraphQL operation.
    async fn execute<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, GraphqlError> {
        let request_body = Q::build_query(variables);

        let mut request = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header("Content-Type", "application/json")
            .json(&request_body);

        if let Some(token) = &self.inner.auth_token {
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
            return Err(GraphqlError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                operation = request_body.operation_name,
                body = %excerpt(&response_text, LOG_BODY_LIMIT),
                "GraphQL API returned non-success status"
            );
            return Err(GraphqlError::Status {
                status: status.as_u16(),
                body: excerpt(&response_text, 200),
            });
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    operation = request_body.operation_name,
                    body = %excerpt(&response_text, LOG_BODY_LIMIT),
                    "Failed to parse GraphQL response"
                );
                return Err(GraphqlError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");
            return Err(GraphqlError::GraphQL(
                errors.into_iter().map(ApiError::from).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                operation = request_body.operation_name,
                body = %excerpt(&response_text, LOG_BODY_LIMIT),
                "GraphQL response has no data and no errors"
            );
            GraphqlError::EmptyResponse(request_body.operation_name)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get name and variants of a product by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_product_details(&self, slug: &str) -> Result<ProductDetail, GraphqlError> {
        let cache_key = CacheKey::ProductDetail {
            slug: slug.to_string(),
        };

        if let Some(CacheValue::ProductDetail(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product details");
            return Ok(*product);
        }

        let data = self
            .execute::<ProductDetails>(product_details::Variables {
                slug: slug.to_string(),
                channel: self.inner.channel.clone(),
            })
            .await?;

        let product = data
            .product
            .map(convert_product_detail)
            .ok_or_else(|| GraphqlError::NotFound(format!("Product not found: {slug}")))?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::ProductDetail(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    /// Get the first `first` products of the channel, in API order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, first: u32) -> Result<Vec<ProductSummary>, GraphqlError> {
        let first = i64::from(first);
        let cache_key = CacheKey::ProductList { first };

        if let Some(CacheValue::ProductList(products)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product list");
            return Ok(products);
        }

        let data = self
            .execute::<ProductList>(product_list::Variables {
                first,
                channel: self.inner.channel.clone(),
            })
            .await?;

        let products = convert_product_list(data.products);

        self.inner
            .cache
            .insert(cache_key, CacheValue::ProductList(products.clone()))
            .await;

        Ok(products)
    }

    // =========================================================================
    // Checkout Methods (not cached - mutable state)
    // =========================================================================

    /// Look up a checkout, returning `None` if the API does not know it.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(checkout_id = %id))]
    pub async fn find_checkout(&self, id: &CheckoutId) -> Result<Option<CheckoutId>, GraphqlError> {
        let data = self
            .execute::<CheckoutFind>(checkout_find::Variables {
                id: id.to_string(),
            })
            .await?;

        Ok(data.checkout.map(|checkout| CheckoutId::new(checkout.id)))
    }

    /// Create an empty checkout in the configured channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation reports
    /// user errors.
    #[instrument(skip(self))]
    pub async fn create_checkout(&self) -> Result<CheckoutId, GraphqlError> {
        let data = self
            .execute::<CheckoutCreate>(checkout_create::Variables {
                channel: self.inner.channel.clone(),
            })
            .await?;

        let payload = data
            .checkout_create
            .ok_or_else(|| GraphqlError::UserError("checkoutCreate returned nothing".into()))?;

        if !payload.errors.is_empty() {
            return Err(GraphqlError::UserError(format_user_errors(&payload.errors)));
        }

        payload
            .checkout
            .map(|checkout| CheckoutId::new(checkout.id))
            .ok_or_else(|| GraphqlError::UserError("No checkout returned".into()))
    }

    /// Add one unit of a variant to a checkout.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the mutation reports
    /// user errors.
    #[instrument(skip(self), fields(checkout_id = %checkout, variant_id = %variant))]
    pub async fn add_checkout_line(
        &self,
        checkout: &CheckoutId,
        variant: &VariantId,
    ) -> Result<(), GraphqlError> {
        let data = self
            .execute::<CheckoutAddLine>(checkout_add_line::Variables {
                id: checkout.to_string(),
                product_variant_id: variant.to_string(),
            })
            .await?;

        let payload = data
            .checkout_lines_add
            .ok_or_else(|| GraphqlError::UserError("checkoutLinesAdd returned nothing".into()))?;

        if !payload.errors.is_empty() {
            return Err(GraphqlError::UserError(format_user_errors(&payload.errors)));
        }

        if payload.checkout.is_none() {
            return Err(GraphqlError::NotFound(format!("Checkout not found: {checkout}")));
        }

        Ok(())
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate cached details for one product.
    pub async fn invalidate_product(&self, slug: &str) {
        self.inner
            .cache
            .invalidate(&CacheKey::ProductDetail {
                slug: slug.to_string(),
            })
            .await;
    }
}

// =============================================================================
// Collaborator Implementations
// =============================================================================

impl QuickAddBackend for GraphqlClient {
    async fn product_details(&self, slug: &str) -> Result<ProductDetail, GraphqlError> {
        self.get_product_details(slug).await
    }

    async fn add_checkout_line(
        &self,
        checkout: &CheckoutId,
        variant: &VariantId,
    ) -> Result<(), GraphqlError> {
        Self::add_checkout_line(self, checkout, variant).await
    }
}

impl CheckoutResolver for GraphqlClient {
    async fn find_checkout(&self, id: &CheckoutId) -> Result<Option<CheckoutId>, GraphqlError> {
        Self::find_checkout(self, id).await
    }

    async fn create_checkout(&self) -> Result<CheckoutId, GraphqlError> {
        Self::create_checkout(self).await
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// First `limit` characters of a response body.
fn excerpt(body: &str, limit: usize) -> String {
    body.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("zł-zł", 2), "zł");
        assert_eq!(excerpt("short", 100), "short");
    }
}
