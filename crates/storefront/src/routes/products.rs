//! Product route handlers.
//!
//! The quick-add endpoints rebuild a [`QuickAddModal`] per request: opening it
//! hits the product detail cache, so the POST handler re-validates the
//! submitted variant against the product it belongs to.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{AppendHeaders, IntoResponse, Response},
};
use quickshop_core::{CheckoutId, ProductDetail, VariantId};
use serde::Deserialize;
use tracing::instrument;

use crate::checkout::{ResolvedCheckout, resolve_checkout};
use crate::components::{ProductList, QuickAddModalTemplate};
use crate::error::{AppError, Result};
use crate::middleware::{CheckoutCookie, set_checkout_cookie};
use crate::quick_add::{AddToCartOutcome, Phase, QuickAddModal};
use crate::state::AppState;

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub list: ProductList,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: ProductDetail,
}

/// Quick-add form submission.
#[derive(Debug, Deserialize)]
pub struct QuickAddForm {
    /// Chosen variant; absent when nothing was selected.
    pub variant_id: Option<String>,
}

/// Display product listing page.
///
/// Resolves the visitor's checkout and refreshes the cookie when it changed.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    CheckoutCookie(existing): CheckoutCookie,
) -> Result<Response> {
    let products = state.graphql().get_products(state.config().page_size).await?;
    let (list, resolved) =
        ProductList::resolve(products, existing.as_ref(), state.graphql()).await?;

    tracing::debug!(
        count = list.elements().len(),
        checkout_id = %resolved.id,
        "Rendering product listing"
    );

    let response = ProductsIndexTemplate { list }.into_response();
    Ok(with_checkout_cookie(
        response,
        &state,
        existing.as_ref(),
        &resolved,
    ))
}

/// Display product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<ProductShowTemplate> {
    let product = state
        .graphql()
        .get_product_details(&slug)
        .await
        .map_err(AppError::from_graphql)?;

    Ok(ProductShowTemplate { product })
}

/// Display the quick-add modal fragment (for HTMX).
///
/// Fetch failures are rendered inside the modal, never as an error status.
#[instrument(skip(state))]
pub async fn quick_add(
    State(state): State<AppState>,
    CheckoutCookie(existing): CheckoutCookie,
    Path(slug): Path<String>,
) -> Result<Response> {
    let resolved = match existing.clone() {
        Some(id) => ResolvedCheckout { id, created: false },
        None => resolve_checkout(state.graphql(), None).await?,
    };

    let mut modal = QuickAddModal::new(state.graphql(), resolved.id.clone());
    modal.show(&slug).await;

    let response = QuickAddModalTemplate::new(&slug, modal.state()).into_response();
    Ok(with_checkout_cookie(
        response,
        &state,
        existing.as_ref(),
        &resolved,
    ))
}

/// Add the selected variant to the visitor's checkout (HTMX).
///
/// - nothing (or an unavailable variant) selected: `204`, no mutation
/// - line added: `204` with `HX-Refresh: true` so the whole page reloads
/// - mutation failed: the dialog re-rendered with a notice
#[instrument(skip(state))]
pub async fn quick_add_submit(
    State(state): State<AppState>,
    CheckoutCookie(existing): CheckoutCookie,
    Path(slug): Path<String>,
    Form(form): Form<QuickAddForm>,
) -> Result<Response> {
    let resolved = resolve_checkout(state.graphql(), existing.as_ref()).await?;

    let mut modal = QuickAddModal::new(state.graphql(), resolved.id.clone());
    modal.show(&slug).await;

    if let Some(variant_id) = form.variant_id.as_deref().and_then(|raw| VariantId::parse(raw).ok())
        && !modal.select_variant(variant_id)
    {
        tracing::debug!("Submitted variant is not selectable");
    }

    let response = match modal.add_to_cart().await {
        AddToCartOutcome::Reload => {
            state.graphql().invalidate_product(&slug).await;
            (
                StatusCode::NO_CONTENT,
                AppendHeaders([("HX-Refresh", "true")]),
            )
                .into_response()
        }
        AddToCartOutcome::Failed => {
            QuickAddModalTemplate::new(&slug, modal.state()).into_response()
        }
        AddToCartOutcome::NotAttempted if modal.state().phase() == Phase::Error => {
            QuickAddModalTemplate::new(&slug, modal.state()).into_response()
        }
        AddToCartOutcome::NotAttempted => StatusCode::NO_CONTENT.into_response(),
    };

    Ok(with_checkout_cookie(
        response,
        &state,
        existing.as_ref(),
        &resolved,
    ))
}

/// Persist the checkout ID when it differs from the one the browser sent.
fn with_checkout_cookie(
    mut response: Response,
    state: &AppState,
    existing: Option<&CheckoutId>,
    resolved: &ResolvedCheckout,
) -> Response {
    if existing != Some(&resolved.id) {
        set_checkout_cookie(
            response.headers_mut(),
            &resolved.id,
            state.config().secure_cookies(),
        );
    }
    response
}
