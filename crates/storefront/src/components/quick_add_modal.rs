//! Rendering of the quick-add modal.

use askama::Template;
use askama_web::WebTemplate;

use crate::quick_add::{ModalState, Phase};

/// One radio option in the variant selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantOption {
    pub id: String,
    pub name: String,
    pub disabled: bool,
    pub selected: bool,
}

/// Dialog contents once product details are available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialog {
    pub product_name: Option<String>,
    pub variants: Vec<VariantOption>,
    pub notice: Option<String>,
    pub submitting: bool,
}

/// What the modal shows for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalBody {
    Hidden,
    Loading,
    Error(String),
    Dialog(Dialog),
}

impl ModalBody {
    #[must_use]
    pub fn from_state(state: &ModalState) -> Self {
        match state.phase() {
            Phase::Hidden => Self::Hidden,
            Phase::Loading => Self::Loading,
            Phase::Error => Self::Error(state.error().unwrap_or_default().to_string()),
            Phase::Ready | Phase::Submitting => Self::Dialog(dialog(state)),
        }
    }
}

fn dialog(state: &ModalState) -> Dialog {
    let selected = state.selected_variant_id();
    let product = state.product();

    Dialog {
        product_name: product.map(|p| p.name.clone()),
        variants: product
            .map(|p| {
                p.variants
                    .iter()
                    .map(|variant| VariantOption {
                        id: variant.id.to_string(),
                        name: variant.name.clone(),
                        disabled: !variant.is_selectable(),
                        selected: selected == Some(&variant.id),
                    })
                    .collect()
            })
            .unwrap_or_default(),
        notice: state.notice().map(str::to_string),
        submitting: state.phase() == Phase::Submitting,
    }
}

/// Quick-add modal fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/quick_add_modal.html")]
pub struct QuickAddModalTemplate {
    /// Form target: `/products/{slug}/quick-add`
    pub action: String,
    pub body: ModalBody,
}

impl QuickAddModalTemplate {
    #[must_use]
    pub fn new(slug: &str, state: &ModalState) -> Self {
        Self {
            action: format!("/products/{}/quick-add", urlencoding::encode(slug)),
            body: ModalBody::from_state(state),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quickshop_core::{ProductDetail, Variant, VariantId};

    use super::*;
    use crate::quick_add::{ModalEvent, transition};

    fn ready_state() -> ModalState {
        let (state, _) = transition(
            ModalState::default(),
            ModalEvent::Show {
                slug: "tee".to_string(),
            },
        );
        let ticket = state.ticket();
        let (state, _) = transition(
            state,
            ModalEvent::DetailLoaded {
                ticket,
                product: ProductDetail {
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
                },
            },
        );
        state
    }

    #[test]
    fn test_hidden_renders_nothing() {
        let html = QuickAddModalTemplate::new("tee", &ModalState::default())
            .render()
            .unwrap();
        assert!(html.trim().is_empty());
    }

    #[test]
    fn test_loading_indicator() {
        let (state, _) = transition(
            ModalState::default(),
            ModalEvent::Show {
                slug: "tee".to_string(),
            },
        );
        let html = QuickAddModalTemplate::new("tee", &state).render().unwrap();
        assert!(html.contains("Loading..."));
    }

    #[test]
    fn test_error_rendered_inline() {
        let (state, _) = transition(
            ModalState::default(),
            ModalEvent::Show {
                slug: "tee".to_string(),
            },
        );
        let ticket = state.ticket();
        let (state, _) = transition(
            state,
            ModalEvent::DetailFailed {
                ticket,
                message: "Not found".to_string(),
            },
        );
        let html = QuickAddModalTemplate::new("tee", &state).render().unwrap();
        assert!(html.contains("Error: Not found"));
    }

    #[test]
    fn test_out_of_stock_variant_disabled() {
        let body = ModalBody::from_state(&ready_state());
        let ModalBody::Dialog(dialog) = body else {
            panic!("expected dialog");
        };
        assert_eq!(dialog.product_name.as_deref(), Some("Tee"));
        assert!(dialog.variants[0].disabled);
        assert!(!dialog.variants[1].disabled);
    }

    #[test]
    fn test_dialog_markup() {
        let html = QuickAddModalTemplate::new("tee", &ready_state())
            .render()
            .unwrap();
        assert!(html.contains(r#"role="dialog""#));
        assert!(html.contains(r#"data-testid="VariantSelector""#));
        assert!(html.contains(r#"value="v1""#));
        assert!(html.contains(r#"aria-disabled="true""#));
        assert!(html.contains("/products/tee/quick-add"));
        assert!(html.contains("Add to cart"));
        assert!(html.contains("Cancel"));
    }

    #[test]
    fn test_cancel_locked_while_adding() {
        let (state, _) = transition(ready_state(), ModalEvent::SelectVariant(VariantId::new("v2")));
        let (state, effect) = transition(state, ModalEvent::AddToCart);
        assert!(effect.is_some());
        assert_eq!(state.phase(), Phase::Submitting);

        let html = QuickAddModalTemplate::new("tee", &state).render().unwrap();
        assert!(html.contains("data-quick-add-close disabled"));
    }

    #[test]
    fn test_form_disables_cancel_during_request() {
        let html = QuickAddModalTemplate::new("tee", &ready_state())
            .render()
            .unwrap();
        assert!(html.contains(r#"hx-disabled-elt="find [type=submit], find [data-quick-add-close]""#));
        assert!(html.contains(r#"hx-sync="this:drop""#));
        assert!(!html.contains("data-quick-add-close disabled"));
    }

    #[test]
    fn test_selected_variant_checked() {
        let (state, _) = transition(ready_state(), ModalEvent::SelectVariant(VariantId::new("v2")));
        let ModalBody::Dialog(dialog) = ModalBody::from_state(&state) else {
            panic!("expected dialog");
        };
        assert!(dialog.variants[1].selected);
        assert!(!dialog.variants[0].selected);
    }
}
