//! Cache types for commerce API responses.

use quickshop_core::{ProductDetail, ProductSummary};

/// Cache key for product queries.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    ProductDetail { slug: String },
    ProductList { first: i64 },
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    ProductDetail(Box<ProductDetail>),
    ProductList(Vec<ProductSummary>),
}
