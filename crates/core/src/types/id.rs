//! Newtype IDs for type-safe entity references.
//!
//! GraphQL node IDs are opaque strings. Use the `define_id!` macro to create
//! wrappers that prevent accidentally passing a product ID where a variant
//! ID is expected.

/// Errors that can occur when parsing an ID from untrusted input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    /// The input is empty or only whitespace.
    #[error("id cannot be empty")]
    Empty,
    /// The input is longer than any ID the API hands out.
    #[error("id must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// Longest ID accepted from cookies and form fields.
pub const MAX_ID_LENGTH: usize = 256;

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `parse()`, `as_str()`
/// - `Display`, `From<String>` and `From<&str>` implementations
///
/// # Example
///
/// ```rust
/// # use quickshop_core::define_id;
/// define_id!(WishlistId);
/// define_id!(ReviewId);
///
/// let wishlist = WishlistId::new("V2lzaGxpc3Q6MQ==");
/// let review = ReviewId::new("UmV2aWV3OjE=");
///
/// // These are different types, so this won't compile:
/// // let _: WishlistId = review;
/// # let _ = (wishlist, review);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a value received from the API.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse an ID from untrusted input (cookie, form field).
            ///
            /// # Errors
            ///
            /// Returns [`IdError`](crate::IdError) if the trimmed input is
            /// empty or longer than [`MAX_ID_LENGTH`](crate::MAX_ID_LENGTH).
            pub fn parse(raw: &str) -> ::core::result::Result<Self, $crate::IdError> {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return Err($crate::IdError::Empty);
                }
                if trimmed.len() > $crate::MAX_ID_LENGTH {
                    return Err($crate::IdError::TooLong {
                        max: $crate::MAX_ID_LENGTH,
                    });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(VariantId);
define_id!(CheckoutId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_whitespace() {
        let id = CheckoutId::parse("  Q2hlY2tvdXQ6MQ==\n").unwrap();
        assert_eq!(id.as_str(), "Q2hlY2tvdXQ6MQ==");
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(CheckoutId::parse(""), Err(IdError::Empty));
        assert_eq!(CheckoutId::parse("   "), Err(IdError::Empty));
    }

    #[test]
    fn test_parse_rejects_oversized() {
        let raw = "a".repeat(MAX_ID_LENGTH + 1);
        assert_eq!(
            VariantId::parse(&raw),
            Err(IdError::TooLong {
                max: MAX_ID_LENGTH
            })
        );
    }

    #[test]
    fn test_serde_transparent() {
        let id = VariantId::new("v2");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"v2\"");
        let back: VariantId = serde_json::from_str("\"v2\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_display() {
        assert_eq!(ProductId::from("p1").to_string(), "p1");
    }
}
