//! Quick add to cart from the product listing.
//!
//! [`QuickAddModal`] drives the pure state machine in [`state`] against a
//! [`QuickAddBackend`]: it feeds user actions in as events, performs the
//! effects the transitions ask for (detail fetch, add-line mutation) and
//! feeds the results back in. The stale-response guard lives in the state
//! machine, so a response is only committed while its ticket is current.

pub mod state;

use std::future::Future;

use quickshop_core::{CheckoutId, ProductDetail, VariantId};
use tracing::instrument;

use crate::graphql::GraphqlError;

pub use state::{ADD_TO_CART_FAILED, Effect, ModalEvent, ModalState, Phase, Ticket, transition};

/// The two remote operations the modal needs.
pub trait QuickAddBackend: Send + Sync {
    /// Fetch name and variants of a product.
    fn product_details(
        &self,
        slug: &str,
    ) -> impl Future<Output = Result<ProductDetail, GraphqlError>> + Send;

    /// Add one unit of `variant` to `checkout`.
    fn add_checkout_line(
        &self,
        checkout: &CheckoutId,
        variant: &VariantId,
    ) -> impl Future<Output = Result<(), GraphqlError>> + Send;
}

/// Result of pressing "Add to cart".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddToCartOutcome {
    /// Nothing selected (or not ready): no mutation was sent.
    NotAttempted,
    /// The line was added; the page must be reloaded.
    Reload,
    /// The mutation failed; the modal is back in Ready with a notice.
    Failed,
}

/// One quick-add modal instance and its exclusively owned state.
pub struct QuickAddModal<'a, B> {
    backend: &'a B,
    checkout_id: CheckoutId,
    state: ModalState,
}

impl<'a, B: QuickAddBackend> QuickAddModal<'a, B> {
    /// Create a hidden modal for the given checkout.
    #[must_use]
    pub fn new(backend: &'a B, checkout_id: CheckoutId) -> Self {
        Self {
            backend,
            checkout_id,
            state: ModalState::default(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ModalState {
        &self.state
    }

    #[must_use]
    pub const fn checkout_id(&self) -> &CheckoutId {
        &self.checkout_id
    }

    /// Make the modal visible for `slug`, loading its variants if needed.
    #[instrument(skip(self), fields(checkout_id = %self.checkout_id))]
    pub async fn show(&mut self, slug: &str) {
        let effect = self.dispatch(ModalEvent::Show {
            slug: slug.to_string(),
        });
        self.perform(effect).await;
    }

    /// Record the user's variant choice. Returns whether it was accepted.
    pub fn select_variant(&mut self, variant_id: VariantId) -> bool {
        let _ = self.dispatch(ModalEvent::SelectVariant(variant_id.clone()));
        self.state.selected_variant_id() == Some(&variant_id)
    }

    /// Add the selected variant to the checkout.
    #[instrument(skip(self), fields(checkout_id = %self.checkout_id, slug = %self.state.slug()))]
    pub async fn add_to_cart(&mut self) -> AddToCartOutcome {
        let effect = self.dispatch(ModalEvent::AddToCart);
        if effect.is_none() {
            tracing::debug!("Add to cart ignored: no selectable variant chosen");
            return AddToCartOutcome::NotAttempted;
        }
        self.perform(effect).await
    }

    fn dispatch(&mut self, event: ModalEvent) -> Option<Effect> {
        let (next, effect) = transition(std::mem::take(&mut self.state), event);
        self.state = next;
        effect
    }

    /// Run effects until the state machine stops asking for more.
    async fn perform(&mut self, mut effect: Option<Effect>) -> AddToCartOutcome {
        let mut outcome = AddToCartOutcome::NotAttempted;

        while let Some(current) = effect.take() {
            effect = match current {
                Effect::FetchDetail { ticket, slug } => {
                    let event = match self.backend.product_details(&slug).await {
                        Ok(product) => ModalEvent::DetailLoaded { ticket, product },
                        Err(e) => {
                            tracing::warn!(slug = %slug, error = %e, "Failed to load product details");
                            ModalEvent::DetailFailed {
                                ticket,
                                message: e.to_string(),
                            }
                        }
                    };
                    self.dispatch(event)
                }
                Effect::AddLine { ticket, variant_id } => {
                    let event = match self
                        .backend
                        .add_checkout_line(&self.checkout_id, &variant_id)
                        .await
                    {
                        Ok(()) => ModalEvent::LineAdded { ticket },
                        Err(e) => ModalEvent::LineFailed {
                            ticket,
                            message: e.to_string(),
                        },
                    };
                    self.dispatch(event)
                }
                Effect::ReloadPage => {
                    outcome = AddToCartOutcome::Reload;
                    None
                }
                Effect::LogError { message } => {
                    tracing::error!(
                        checkout_id = %self.checkout_id,
                        slug = %self.state.slug(),
                        error = %message,
                        "Failed to add line to checkout"
                    );
                    outcome = AddToCartOutcome::Failed;
                    None
                }
            };
        }

        outcome
    }
}
