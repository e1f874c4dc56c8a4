//! Conversions from raw GraphQL responses into core view models.

use quickshop_core::{
    CurrencyCode, Money, MoneyRange, ProductDetail, ProductId, ProductSummary, Thumbnail, Variant,
    VariantId,
};
use rust_decimal::Decimal;

use super::queries::{CheckoutError, product_details, product_list};

/// Convert a product detail response, defaulting missing stock to 0.
pub fn convert_product_detail(product: product_details::Product) -> ProductDetail {
    ProductDetail {
        name: product.name,
        variants: product
            .variants
            .unwrap_or_default()
            .into_iter()
            .map(convert_variant)
            .collect(),
    }
}

fn convert_variant(variant: product_details::ProductVariant) -> Variant {
    Variant {
        id: VariantId::new(variant.id),
        name: variant.name,
        quantity_available: variant
            .quantity_available
            .and_then(|quantity| u32::try_from(quantity).ok())
            .unwrap_or(0),
    }
}

/// Convert the listing connection into product summaries, preserving order.
pub fn convert_product_list(
    connection: Option<product_list::ProductCountableConnection>,
) -> Vec<ProductSummary> {
    connection
        .map(|c| c.edges)
        .unwrap_or_default()
        .into_iter()
        .map(|edge| convert_product_summary(edge.node))
        .collect()
}

fn convert_product_summary(node: product_list::ProductListItem) -> ProductSummary {
    let price_range = node
        .pricing
        .and_then(|pricing| pricing.price_range)
        .map_or_else(MoneyRange::default, |range| {
            MoneyRange::new(
                range.start.and_then(|m| convert_money(m.gross)),
                range.stop.and_then(|m| convert_money(m.gross)),
            )
        });

    ProductSummary {
        id: ProductId::new(node.id),
        slug: node.slug,
        name: node.name,
        category: node.category.map(|c| c.name),
        thumbnail: node.thumbnail.map(|image| Thumbnail {
            url: image.url,
            alt: image.alt.unwrap_or_default(),
        }),
        price_range,
    }
}

/// Convert an API float amount. Non-finite amounts are dropped.
fn convert_money(money: product_list::Money) -> Option<Money> {
    let amount = Decimal::try_from(money.amount).ok()?;
    Some(Money::new(amount, CurrencyCode::from(money.currency)))
}

/// Join mutation user errors into one message.
pub fn format_user_errors(errors: &[CheckoutError]) -> String {
    errors
        .iter()
        .map(|e| {
            let message = e.message.as_deref().unwrap_or("unknown error");
            match (&e.field, &e.code) {
                (Some(field), Some(code)) => format!("{field}: {message} ({code})"),
                (Some(field), None) => format!("{field}: {message}"),
                (None, Some(code)) => format!("{message} ({code})"),
                (None, None) => message.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_product_detail_normalizes_quantity() {
        let detail = convert_product_detail(product_details::Product {
            id: "p1".to_string(),
            name: "Tee".to_string(),
            variants: Some(vec![
                product_details::ProductVariant {
                    id: "v1".to_string(),
                    name: "S".to_string(),
                    quantity_available: None,
                },
                product_details::ProductVariant {
                    id: "v2".to_string(),
                    name: "M".to_string(),
                    quantity_available: Some(5),
                },
                product_details::ProductVariant {
                    id: "v3".to_string(),
                    name: "L".to_string(),
                    quantity_available: Some(-2),
                },
            ]),
        });

        let quantities: Vec<u32> = detail.variants.iter().map(|v| v.quantity_available).collect();
        assert_eq!(quantities, vec![0, 5, 0]);
    }

    #[test]
    fn test_convert_product_detail_without_variants() {
        let detail = convert_product_detail(product_details::Product {
            id: "p1".to_string(),
            name: "Gift card".to_string(),
            variants: None,
        });
        assert!(detail.variants.is_empty());
    }

    #[test]
    fn test_convert_product_list_preserves_order_and_fields() {
        let connection: product_list::ProductCountableConnection = serde_json::from_str(
            r#"{"edges":[
                {"node":{"id":"p1","name":"Hoodie","slug":"hoodie","category":{"name":"Apparel"},
                  "thumbnail":{"url":"https://cdn.example.com/h.webp","alt":null},
                  "pricing":{"priceRange":{"start":{"gross":{"amount":10.0,"currency":"USD"}},
                                           "stop":{"gross":{"amount":24.99,"currency":"USD"}}}}}},
                {"node":{"id":"p2","name":"Mug","slug":"mug","category":null,"thumbnail":null,"pricing":null}}
            ]}"#,
        )
        .unwrap();

        let products = convert_product_list(Some(connection));
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].slug, "hoodie");
        assert_eq!(products[0].category.as_deref(), Some("Apparel"));
        assert_eq!(products[0].thumbnail.as_ref().unwrap().alt, "");
        assert_eq!(products[0].price_range.display(), "$10.00 - $24.99");
        assert_eq!(products[1].slug, "mug");
        assert!(products[1].thumbnail.is_none());
        assert_eq!(products[1].price_range.display(), "");
    }

    #[test]
    fn test_format_user_errors() {
        let errors = vec![
            CheckoutError {
                field: Some("variantId".to_string()),
                message: Some("Insufficient stock".to_string()),
                code: Some("INSUFFICIENT_STOCK".to_string()),
            },
            CheckoutError {
                field: None,
                message: None,
                code: None,
            },
        ];
        assert_eq!(
            format_user_errors(&errors),
            "variantId: Insufficient stock (INSUFFICIENT_STOCK); unknown error"
        );
    }
}
