//! GraphQL operation definitions for the commerce API.
//!
//! Each operation implements [`GraphQLQuery`] by hand so the request and
//! response shapes stay next to the document they belong to. Module names
//! follow `graphql_client`'s codegen layout (`product_details::Variables`,
//! `product_details::ResponseData`).

use graphql_client::{GraphQLQuery, QueryBody};

/// Implement [`GraphQLQuery`] for a unit struct backed by a module holding
/// `Variables` and `ResponseData`.
macro_rules! operation {
    ($name:ident, $module:ident, $document:expr) => {
        pub struct $name;

        impl GraphQLQuery for $name {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $document,
                    operation_name: stringify!($name),
                }
            }
        }
    };
}

// =============================================================================
// Products
// =============================================================================

operation!(
    ProductDetails,
    product_details,
    r"query ProductDetails($slug: String!, $channel: String!) {
  product(slug: $slug, channel: $channel) {
    id
    name
    variants {
      id
      name
      quantityAvailable
    }
  }
}"
);

pub mod product_details {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub slug: String,
        pub channel: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<Product>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Product {
        pub id: String,
        pub name: String,
        pub variants: Option<Vec<ProductVariant>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductVariant {
        pub id: String,
        pub name: String,
        pub quantity_available: Option<i64>,
    }
}

operation!(
    ProductList,
    product_list,
    r"query ProductList($first: Int!, $channel: String!) {
  products(first: $first, channel: $channel) {
    edges {
      node {
        id
        name
        slug
        category {
          name
        }
        thumbnail(size: 1024, format: WEBP) {
          url
          alt
        }
        pricing {
          priceRange {
            start {
              gross {
                amount
                currency
              }
            }
            stop {
              gross {
                amount
                currency
              }
            }
          }
        }
      }
    }
  }
}"
);

pub mod product_list {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
        pub channel: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Option<ProductCountableConnection>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductCountableConnection {
        pub edges: Vec<ProductCountableEdge>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductCountableEdge {
        pub node: ProductListItem,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ProductListItem {
        pub id: String,
        pub name: String,
        pub slug: String,
        pub category: Option<Category>,
        pub thumbnail: Option<Image>,
        pub pricing: Option<ProductPricingInfo>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Category {
        pub name: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Image {
        pub url: String,
        pub alt: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ProductPricingInfo {
        pub price_range: Option<TaxedMoneyRange>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct TaxedMoneyRange {
        pub start: Option<TaxedMoney>,
        pub stop: Option<TaxedMoney>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct TaxedMoney {
        pub gross: Money,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Money {
        pub amount: f64,
        pub currency: String,
    }
}

// =============================================================================
// Checkout
// =============================================================================

operation!(
    CheckoutFind,
    checkout_find,
    r"query CheckoutFind($id: ID!) {
  checkout(id: $id) {
    id
  }
}"
);

pub mod checkout_find {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub checkout: Option<Checkout>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Checkout {
        pub id: String,
    }
}

operation!(
    CheckoutCreate,
    checkout_create,
    r"mutation CheckoutCreate($channel: String!) {
  checkoutCreate(input: { channel: $channel, lines: [] }) {
    checkout {
      id
    }
    errors {
      field
      message
      code
    }
  }
}"
);

pub mod checkout_create {
    use serde::{Deserialize, Serialize};

    pub use super::CheckoutError;

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub channel: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub checkout_create: Option<CheckoutCreatePayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CheckoutCreatePayload {
        pub checkout: Option<Checkout>,
        #[serde(default)]
        pub errors: Vec<CheckoutError>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Checkout {
        pub id: String,
    }
}

operation!(
    CheckoutAddLine,
    checkout_add_line,
    r"mutation CheckoutAddLine($id: ID!, $productVariantId: ID!) {
  checkoutLinesAdd(id: $id, lines: [{ quantity: 1, variantId: $productVariantId }]) {
    checkout {
      id
    }
    errors {
      field
      message
      code
    }
  }
}"
);

pub mod checkout_add_line {
    use serde::{Deserialize, Serialize};

    pub use super::CheckoutError;

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub id: String,
        pub product_variant_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub checkout_lines_add: Option<CheckoutLinesAddPayload>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct CheckoutLinesAddPayload {
        pub checkout: Option<Checkout>,
        #[serde(default)]
        pub errors: Vec<CheckoutError>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Checkout {
        pub id: String,
    }
}

/// User error returned by checkout mutations.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CheckoutError {
    pub field: Option<String>,
    pub message: Option<String>,
    pub code: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_add_line_variables_use_api_names() {
        let body = CheckoutAddLine::build_query(checkout_add_line::Variables {
            id: "c1".to_string(),
            product_variant_id: "v2".to_string(),
        });
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["operationName"], "CheckoutAddLine");
        assert_eq!(json["variables"]["id"], "c1");
        assert_eq!(json["variables"]["productVariantId"], "v2");
    }

    #[test]
    fn test_product_details_parses_missing_quantity() {
        let data: product_details::ResponseData = serde_json::from_str(
            r#"{"product":{"id":"p1","name":"Tee","variants":[
                {"id":"v1","name":"S","quantityAvailable":null},
                {"id":"v2","name":"M","quantityAvailable":5}
            ]}}"#,
        )
        .unwrap();
        let variants = data.product.unwrap().variants.unwrap();
        assert_eq!(variants[0].quantity_available, None);
        assert_eq!(variants[1].quantity_available, Some(5));
    }

    #[test]
    fn test_mutation_errors_default_to_empty() {
        let data: checkout_create::ResponseData =
            serde_json::from_str(r#"{"checkoutCreate":{"checkout":{"id":"c1"}}}"#).unwrap();
        assert!(data.checkout_create.unwrap().errors.is_empty());
    }
}
