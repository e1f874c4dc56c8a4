//! Quick-add modal state machine.
//!
//! ```text
//! Hidden ──Show(slug)──▶ Loading ──DetailLoaded──▶ Ready ──AddToCart──▶ Submitting
//!    ▲                      │                       │  ▲                   │
//!    │                      └──DetailFailed──▶ Error   └──LineFailed───────┤
//!    └──────────────── Close (from any state) ◀────────────────────────────┘
//!                                                         LineAdded ──▶ reload
//! ```
//!
//! [`transition`] is pure: it takes the current state and an event and
//! returns the next state plus at most one [`Effect`] for the caller to
//! perform. Every request carries a [`Ticket`]; a response whose ticket no
//! longer matches the state's ticket is dropped.

use quickshop_core::{ProductDetail, VariantId};

/// Generation of the request whose response may still be committed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    #[must_use]
    const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Rendered phase, derived from [`ModalState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Loading,
    Error,
    Ready,
    Submitting,
}

/// Modal-local state. Owned exclusively by one modal instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalState {
    visible: bool,
    slug: String,
    product: Option<ProductDetail>,
    selected_variant_id: Option<VariantId>,
    loading: bool,
    error: Option<String>,
    submitting: bool,
    notice: Option<String>,
    ticket: Ticket,
}

impl ModalState {
    #[must_use]
    pub fn phase(&self) -> Phase {
        if !self.visible {
            Phase::Hidden
        } else if self.loading {
            Phase::Loading
        } else if self.error.is_some() {
            Phase::Error
        } else if self.submitting {
            Phase::Submitting
        } else {
            Phase::Ready
        }
    }

    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub const fn product(&self) -> Option<&ProductDetail> {
        self.product.as_ref()
    }

    #[must_use]
    pub const fn selected_variant_id(&self) -> Option<&VariantId> {
        self.selected_variant_id.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Message of a failed detail fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Message of a failed add-to-cart attempt, shown above the buttons.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        self.ticket
    }

    /// Fresh hidden state that invalidates every outstanding ticket.
    fn discarded(&self) -> Self {
        Self {
            ticket: self.ticket.next(),
            ..Self::default()
        }
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent {
    /// The owner made the modal visible for `slug`.
    Show { slug: String },
    /// Cancel or close from any state.
    Close,
    DetailLoaded {
        ticket: Ticket,
        product: ProductDetail,
    },
    DetailFailed {
        ticket: Ticket,
        message: String,
    },
    SelectVariant(VariantId),
    AddToCart,
    LineAdded {
        ticket: Ticket,
    },
    LineFailed {
        ticket: Ticket,
        message: String,
    },
}

/// Side effects requested by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchDetail { ticket: Ticket, slug: String },
    AddLine { ticket: Ticket, variant_id: VariantId },
    /// Reload the whole page so every cart indicator is refreshed.
    ReloadPage,
    LogError { message: String },
}

/// Notice shown when the add-to-cart mutation fails.
pub const ADD_TO_CART_FAILED: &str = "Could not add this item to your cart. Please try again.";

/// Apply `event` to `state`.
#[must_use]
pub fn transition(state: ModalState, event: ModalEvent) -> (ModalState, Option<Effect>) {
    match event {
        ModalEvent::Show { slug } => show(state, slug),
        ModalEvent::Close => (state.discarded(), None),
        ModalEvent::DetailLoaded { ticket, product } => {
            if !awaiting_detail(&state, ticket) {
                return (state, None);
            }
            let next = ModalState {
                loading: false,
                error: None,
                product: Some(product),
                ..state
            };
            (next, None)
        }
        ModalEvent::DetailFailed { ticket, message } => {
            if !awaiting_detail(&state, ticket) {
                return (state, None);
            }
            let next = ModalState {
                loading: false,
                error: Some(message),
                ..state
            };
            (next, None)
        }
        ModalEvent::SelectVariant(variant_id) => {
            let selectable = state.phase() == Phase::Ready
                && state
                    .product
                    .as_ref()
                    .is_some_and(|p| p.selectable_variant(&variant_id).is_some());
            if !selectable {
                return (state, None);
            }
            let next = ModalState {
                selected_variant_id: Some(variant_id),
                notice: None,
                ..state
            };
            (next, None)
        }
        ModalEvent::AddToCart => {
            if state.phase() != Phase::Ready {
                return (state, None);
            }
            let Some(variant_id) = state.selected_variant_id.clone() else {
                return (state, None);
            };
            let ticket = state.ticket.next();
            let next = ModalState {
                submitting: true,
                notice: None,
                ticket,
                ..state
            };
            (next, Some(Effect::AddLine { ticket, variant_id }))
        }
        ModalEvent::LineAdded { ticket } => {
            if !awaiting_line(&state, ticket) {
                return (state, None);
            }
            let next = ModalState {
                submitting: false,
                selected_variant_id: None,
                ..state
            };
            (next, Some(Effect::ReloadPage))
        }
        ModalEvent::LineFailed { ticket, message } => {
            if !awaiting_line(&state, ticket) {
                return (state, None);
            }
            let next = ModalState {
                submitting: false,
                notice: Some(ADD_TO_CART_FAILED.to_string()),
                ..state
            };
            (next, Some(Effect::LogError { message }))
        }
    }
}

fn show(state: ModalState, slug: String) -> (ModalState, Option<Effect>) {
    // Same (visible, slug) pair: never re-fire.
    if state.visible && state.slug == slug {
        return (state, None);
    }

    let ticket = state.ticket.next();
    let loading = !slug.is_empty();
    let effect = loading.then(|| Effect::FetchDetail {
        ticket,
        slug: slug.clone(),
    });
    let next = ModalState {
        visible: true,
        slug,
        loading,
        ticket,
        ..ModalState::default()
    };
    (next, effect)
}

fn awaiting_detail(state: &ModalState, ticket: Ticket) -> bool {
    state.visible && state.loading && state.ticket == ticket
}

fn awaiting_line(state: &ModalState, ticket: Ticket) -> bool {
    state.visible && state.submitting && state.ticket == ticket
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quickshop_core::Variant;

    use super::*;

    fn detail() -> ProductDetail {
        ProductDetail {
            name: "Tee".to_string(),
            variants: vec![
                Variant {
                    id: VariantId::new("v1"),
                    name: "S".to_string(),
                    quantity_available: 0,
                },
                Variant {
                    id: VariantId::new("v2"),
                    name: "M".to_string(),
                    quantity_available: 5,
                },
            ],
        }
    }

    fn show_slug(state: ModalState, slug: &str) -> (ModalState, Option<Effect>) {
        transition(
            state,
            ModalEvent::Show {
                slug: slug.to_string(),
            },
        )
    }

    /// Open for `slug` and deliver a successful fetch.
    fn ready(slug: &str) -> ModalState {
        let (state, _) = show_slug(ModalState::default(), slug);
        let ticket = state.ticket();
        let (state, effect) = transition(
            state,
            ModalEvent::DetailLoaded {
                ticket,
                product: detail(),
            },
        );
        assert_eq!(effect, None);
        state
    }

    #[test]
    fn test_starts_hidden() {
        assert_eq!(ModalState::default().phase(), Phase::Hidden);
    }

    #[test]
    fn test_show_fetches_once_per_slug() {
        let (state, effect) = show_slug(ModalState::default(), "tee");
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(
            effect,
            Some(Effect::FetchDetail {
                ticket: state.ticket(),
                slug: "tee".to_string()
            })
        );

        let (again, effect) = show_slug(state.clone(), "tee");
        assert_eq!(effect, None);
        assert_eq!(again, state);
    }

    #[test]
    fn test_show_with_empty_slug_does_not_fetch() {
        let (state, effect) = show_slug(ModalState::default(), "");
        assert_eq!(effect, None);
        assert!(state.is_visible());
        assert_eq!(state.phase(), Phase::Ready);
        assert!(state.product().is_none());
    }

    #[test]
    fn test_slug_change_refetches_and_drops_selection() {
        let (state, _) = transition(ready("tee"), ModalEvent::SelectVariant(VariantId::new("v2")));
        assert!(state.selected_variant_id().is_some());

        let (state, effect) = show_slug(state, "mug");
        assert!(matches!(effect, Some(Effect::FetchDetail { ref slug, .. }) if slug == "mug"));
        assert_eq!(state.phase(), Phase::Loading);
        assert!(state.selected_variant_id().is_none());
        assert!(state.product().is_none());
    }

    #[test]
    fn test_detail_failure_shows_error() {
        let (state, _) = show_slug(ModalState::default(), "tee");
        let ticket = state.ticket();
        let (state, effect) = transition(
            state,
            ModalEvent::DetailFailed {
                ticket,
                message: "boom".to_string(),
            },
        );
        assert_eq!(effect, None);
        assert_eq!(state.phase(), Phase::Error);
        assert_eq!(state.error(), Some("boom"));
    }

    #[test]
    fn test_stale_detail_after_close_is_dropped() {
        let (state, _) = show_slug(ModalState::default(), "tee");
        let old_ticket = state.ticket();
        let (closed, _) = transition(state, ModalEvent::Close);

        let (after, _) = transition(
            closed.clone(),
            ModalEvent::DetailLoaded {
                ticket: old_ticket,
                product: detail(),
            },
        );
        assert_eq!(after, closed);
        assert_eq!(after.phase(), Phase::Hidden);
    }

    #[test]
    fn test_stale_detail_from_previous_slug_is_dropped() {
        let (state, _) = show_slug(ModalState::default(), "tee");
        let tee_ticket = state.ticket();
        let (state, _) = show_slug(state, "mug");

        let (state, _) = transition(
            state,
            ModalEvent::DetailFailed {
                ticket: tee_ticket,
                message: "late".to_string(),
            },
        );
        assert_eq!(state.phase(), Phase::Loading);
        assert_eq!(state.slug(), "mug");
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_out_of_stock_variant_cannot_be_selected() {
        let (state, _) = transition(ready("tee"), ModalEvent::SelectVariant(VariantId::new("v1")));
        assert_eq!(state.selected_variant_id(), None);

        let (state, _) = transition(state, ModalEvent::SelectVariant(VariantId::new("v2")));
        assert_eq!(state.selected_variant_id(), Some(&VariantId::new("v2")));
        assert_eq!(state.phase(), Phase::Ready);
    }

    #[test]
    fn test_unknown_variant_cannot_be_selected() {
        let (state, _) = transition(ready("tee"), ModalEvent::SelectVariant(VariantId::new("v9")));
        assert_eq!(state.selected_variant_id(), None);
    }

    #[test]
    fn test_selection_ignored_while_loading() {
        let (state, _) = show_slug(ModalState::default(), "tee");
        let (state, _) = transition(state, ModalEvent::SelectVariant(VariantId::new("v2")));
        assert_eq!(state.selected_variant_id(), None);
    }

    #[test]
    fn test_add_to_cart_without_selection_is_noop() {
        let state = ready("tee");
        let (next, effect) = transition(state.clone(), ModalEvent::AddToCart);
        assert_eq!(effect, None);
        assert_eq!(next, state);
    }

    #[test]
    fn test_add_to_cart_success_reloads() {
        let (state, _) = transition(ready("tee"), ModalEvent::SelectVariant(VariantId::new("v2")));
        let (state, effect) = transition(state, ModalEvent::AddToCart);
        assert_eq!(state.phase(), Phase::Submitting);
        let Some(Effect::AddLine { ticket, variant_id }) = effect else {
            panic!("expected AddLine, got {effect:?}");
        };
        assert_eq!(variant_id, VariantId::new("v2"));

        // A second click while submitting does nothing.
        let (state, effect) = transition(state, ModalEvent::AddToCart);
        assert_eq!(effect, None);

        let (state, effect) = transition(state, ModalEvent::LineAdded { ticket });
        assert_eq!(effect, Some(Effect::ReloadPage));
        assert_eq!(state.selected_variant_id(), None);
    }

    #[test]
    fn test_add_to_cart_failure_returns_to_ready_with_notice() {
        let (state, _) = transition(ready("tee"), ModalEvent::SelectVariant(VariantId::new("v2")));
        let (state, effect) = transition(state, ModalEvent::AddToCart);
        let Some(Effect::AddLine { ticket, .. }) = effect else {
            panic!("expected AddLine");
        };

        let (state, effect) = transition(
            state,
            ModalEvent::LineFailed {
                ticket,
                message: "insufficient stock".to_string(),
            },
        );
        assert_eq!(
            effect,
            Some(Effect::LogError {
                message: "insufficient stock".to_string()
            })
        );
        assert_eq!(state.phase(), Phase::Ready);
        assert_eq!(state.notice(), Some(ADD_TO_CART_FAILED));
        assert_eq!(state.selected_variant_id(), Some(&VariantId::new("v2")));
    }

    #[test]
    fn test_line_added_after_close_is_dropped() {
        let (state, _) = transition(ready("tee"), ModalEvent::SelectVariant(VariantId::new("v2")));
        let (state, effect) = transition(state, ModalEvent::AddToCart);
        let Some(Effect::AddLine { ticket, .. }) = effect else {
            panic!("expected AddLine");
        };
        let (state, _) = transition(state, ModalEvent::Close);
        let (_, effect) = transition(state, ModalEvent::LineAdded { ticket });
        assert_eq!(effect, None);
    }

    #[test]
    fn test_close_after_error_allows_fresh_fetch() {
        let (state, _) = show_slug(ModalState::default(), "tee");
        let ticket = state.ticket();
        let (state, _) = transition(
            state,
            ModalEvent::DetailFailed {
                ticket,
                message: "boom".to_string(),
            },
        );
        let (state, _) = transition(state, ModalEvent::Close);
        assert_eq!(state.error(), None);
        assert_eq!(state.phase(), Phase::Hidden);

        let (state, effect) = show_slug(state, "tee");
        assert!(matches!(effect, Some(Effect::FetchDetail { .. })));
        assert_eq!(state.phase(), Phase::Loading);
    }
}
