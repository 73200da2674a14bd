//! Newtype IDs for type-safe entity references.
//!
//! The backend identifies documents with opaque strings. Use the
//! `define_id!` macro to create wrappers that prevent accidentally mixing
//! IDs from different entity types.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use lumen_core::define_id;
/// define_id!(ReviewId);
/// define_id!(CategoryId);
///
/// let review_id = ReviewId::new("65a1f0c2e4b0");
/// let category_id = CategoryId::from("houseplants");
///
/// assert_eq!(review_id.as_str(), "65a1f0c2e4b0");
/// // These are different types, so this won't compile:
/// // let _: ReviewId = category_id;
/// # let _ = category_id;
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
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
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

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);
define_id!(OrderId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_is_transparent() {
        let id: ProductId = serde_json::from_str("\"64f1c0ffee\"").unwrap();
        assert_eq!(id.as_str(), "64f1c0ffee");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"64f1c0ffee\"");
    }

    #[test]
    fn test_display_matches_inner() {
        let id = OrderId::from("order-1");
        assert_eq!(id.to_string(), "order-1");
        assert_eq!(String::from(id), "order-1");
    }
}
