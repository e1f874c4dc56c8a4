//! Catalog view models shared by the listing and the quick-add modal.
//!
//! These are transient: supplied by the GraphQL client for one render and
//! never persisted.

use serde::{Deserialize, Serialize};

use crate::types::{MoneyRange, ProductId, VariantId};

/// Product thumbnail image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnail {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility (empty when the API has none).
    pub alt: String,
}

/// A product as shown in the listing grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: ProductId,
    /// URL handle, used for `/products/{slug}`.
    pub slug: String,
    pub name: String,
    pub category: Option<String>,
    pub thumbnail: Option<Thumbnail>,
    /// Gross price range across variants.
    pub price_range: MoneyRange,
}

impl ProductSummary {
    /// Path of the product detail page.
    #[must_use]
    pub fn href(&self) -> String {
        format!("/products/{}", self.slug)
    }
}

/// A purchasable configuration of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    pub name: String,
    /// Units in stock; 0 when the API did not report a quantity.
    pub quantity_available: u32,
}

impl Variant {
    /// Whether the variant may be picked in the variant selector.
    #[must_use]
    pub const fn is_selectable(&self) -> bool {
        self.quantity_available > 0
    }
}

/// Full variant data for one product, loaded lazily by the quick-add modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDetail {
    pub name: String,
    pub variants: Vec<Variant>,
}

impl ProductDetail {
    /// Look up a variant by ID.
    #[must_use]
    pub fn variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variants.iter().find(|variant| &variant.id == id)
    }

    /// Look up a variant by ID, only if it can be selected.
    #[must_use]
    pub fn selectable_variant(&self, id: &VariantId) -> Option<&Variant> {
        self.variant(id).filter(|variant| variant.is_selectable())
    }
}
