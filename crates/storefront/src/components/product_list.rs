//! The listing grid.

use quickshop_core::{CheckoutId, ProductSummary};

use super::product_element::{ImageLoading, ProductElement};
use crate::checkout::{CheckoutResolver, ResolvedCheckout, resolve_checkout};
use crate::graphql::GraphqlError;

/// Number of leading cards whose thumbnails load eagerly.
pub const EAGER_IMAGE_COUNT: usize = 3;

/// Ordered product cards sharing one checkout identity.
#[derive(Debug, Clone)]
pub struct ProductList {
    elements: Vec<ProductElement>,
    checkout_id: CheckoutId,
}

impl ProductList {
    /// Build cards in order: the first gets the priority hint, the first
    /// [`EAGER_IMAGE_COUNT`] load eagerly, the rest lazily.
    #[must_use]
    pub fn new(products: Vec<ProductSummary>, checkout_id: &CheckoutId) -> Self {
        let elements = products
            .into_iter()
            .enumerate()
            .map(|(index, product)| {
                let loading = if index < EAGER_IMAGE_COUNT {
                    ImageLoading::Eager
                } else {
                    ImageLoading::Lazy
                };
                ProductElement::new(product, index, loading, index == 0, checkout_id.clone())
            })
            .collect();

        Self {
            elements,
            checkout_id: checkout_id.clone(),
        }
    }

    /// Resolve the checkout from the cookie value, then build the list.
    ///
    /// # Errors
    ///
    /// Propagates the resolver's failure.
    pub async fn resolve<R: CheckoutResolver>(
        products: Vec<ProductSummary>,
        existing: Option<&CheckoutId>,
        resolver: &R,
    ) -> Result<(Self, ResolvedCheckout), GraphqlError> {
        let resolved = resolve_checkout(resolver, existing).await?;
        Ok((Self::new(products, &resolved.id), resolved))
    }

    #[must_use]
    pub fn elements(&self) -> &[ProductElement] {
        &self.elements
    }

    #[must_use]
    pub const fn checkout_id(&self) -> &CheckoutId {
        &self.checkout_id
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
