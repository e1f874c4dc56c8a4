//! One product card in the listing grid.

use quickshop_core::{CheckoutId, ProductSummary};

/// Image loading hint for a card's thumbnail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageLoading {
    Eager,
    Lazy,
}

impl ImageLoading {
    /// Value of the `loading` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eager => "eager",
            Self::Lazy => "lazy",
        }
    }
}

/// A product card: link to the detail page plus a "Quick shop" action.
///
/// Whether the card's quick-add modal is open is held by its modal slot in
/// the page ([`modal_slot_id`](Self::modal_slot_id)): the Quick shop button
/// fills the slot, Cancel empties it. The listing always renders it empty.
#[derive(Debug, Clone)]
pub struct ProductElement {
    product: ProductSummary,
    index: usize,
    loading: ImageLoading,
    priority: bool,
    checkout_id: CheckoutId,
}

impl ProductElement {
    #[must_use]
    pub const fn new(
        product: ProductSummary,
        index: usize,
        loading: ImageLoading,
        priority: bool,
        checkout_id: CheckoutId,
    ) -> Self {
        Self {
            product,
            index,
            loading,
            priority,
            checkout_id,
        }
    }

    #[must_use]
    pub const fn product(&self) -> &ProductSummary {
        &self.product
    }

    #[must_use]
    pub const fn loading(&self) -> ImageLoading {
        self.loading
    }

    #[must_use]
    pub const fn priority(&self) -> bool {
        self.priority
    }

    #[must_use]
    pub const fn checkout_id(&self) -> &CheckoutId {
        &self.checkout_id
    }

    /// Link target: `/products/{slug}`.
    #[must_use]
    pub fn href(&self) -> String {
        self.product.href()
    }

    /// Endpoint serving this card's quick-add modal.
    #[must_use]
    pub fn quick_add_path(&self) -> String {
        format!("/products/{}/quick-add", urlencoding::encode(&self.product.slug))
    }

    /// DOM id of the element the modal is mounted into.
    #[must_use]
    pub fn modal_slot_id(&self) -> String {
        format!("quick-add-{}", self.index)
    }
}

#[cfg(test)]
mod tests {
    use quickshop_core::{MoneyRange, ProductId, Thumbnail};

    use super::*;

    fn element() -> ProductElement {
        ProductElement::new(
            ProductSummary {
                id: ProductId::new("p1"),
                slug: "blue hoodie".to_string(),
                name: "Blue Hoodie".to_string(),
                category: Some("Apparel".to_string()),
                thumbnail: Some(Thumbnail {
                    url: "https://cdn.example.com/hoodie.webp".to_string(),
                    alt: String::new(),
                }),
                price_range: MoneyRange::default(),
            },
            4,
            ImageLoading::Lazy,
            false,
            CheckoutId::new("c1"),
        )
    }

    #[test]
    fn test_paths() {
        let element = element();
        assert_eq!(element.href(), "/products/blue hoodie");
        assert_eq!(element.quick_add_path(), "/products/blue%20hoodie/quick-add");
        assert_eq!(element.modal_slot_id(), "quick-add-4");
    }
}
