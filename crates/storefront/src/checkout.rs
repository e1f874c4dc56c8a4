//! Checkout identity resolution.
//!
//! Every listing render needs a checkout ID to hand down to the quick-add
//! modals. An ID from the `checkoutId` cookie is reused while the API still
//! knows it; otherwise a new checkout is created. The caller writes the
//! resolved ID back to the cookie so the same shopper keeps one checkout.

use std::future::Future;

use quickshop_core::CheckoutId;
use tracing::instrument;

use crate::graphql::GraphqlError;

/// Looks up and creates checkouts.
pub trait CheckoutResolver: Send + Sync {
    /// Return the checkout if it still exists.
    fn find_checkout(
        &self,
        id: &CheckoutId,
    ) -> impl Future<Output = Result<Option<CheckoutId>, GraphqlError>> + Send;

    /// Create a new, empty checkout.
    fn create_checkout(&self) -> impl Future<Output = Result<CheckoutId, GraphqlError>> + Send;
}

/// A checkout ID plus whether it was created for this request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCheckout {
    pub id: CheckoutId,
    pub created: bool,
}

/// Resolve the shopper's checkout, creating one only when needed.
///
/// # Errors
///
/// Propagates the resolver's failure unchanged.
#[instrument(skip(resolver))]
pub async fn resolve_checkout<R: CheckoutResolver>(
    resolver: &R,
    existing: Option<&CheckoutId>,
) -> Result<ResolvedCheckout, GraphqlError> {
    if let Some(id) = existing {
        if let Some(found) = resolver.find_checkout(id).await? {
            return Ok(ResolvedCheckout {
                id: found,
                created: false,
            });
        }
        tracing::info!(checkout_id = %id, "Checkout from cookie no longer exists");
    }

    let id = resolver.create_checkout().await?;
    tracing::info!(checkout_id = %id, "Created checkout");
    Ok(ResolvedCheckout { id, created: true })
}
