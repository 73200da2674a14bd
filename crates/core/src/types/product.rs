//! Catalog product snapshots.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as returned by catalog listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Image file name, relative to the static asset base.
    pub image: String,
    /// URL slug of the product detail page.
    pub url: String,
    #[serde(default)]
    pub is_in_favorite: bool,
    /// Quantity already in the cart, when the listing endpoint knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_in_cart: Option<u32>,
}

/// A product on the favorites list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteProduct {
    pub id: ProductId,
    pub name: String,
    pub url: String,
    pub image: String,
    pub price: Price,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_defaults_optional_flags() {
        let product: Product = serde_json::from_str(
            r#"{"id":"p1","name":"Monstera","price":1200,"image":"monstera.jpg","url":"monstera"}"#,
        )
        .unwrap();
        assert!(!product.is_in_favorite);
        assert_eq!(product.count_in_cart, None);
    }

    #[test]
    fn test_product_reads_camel_case_flags() {
        let product: Product = serde_json::from_str(
            r#"{"id":"p1","name":"Monstera","price":1200,"image":"m.jpg","url":"monstera",
                "isInFavorite":true,"countInCart":3}"#,
        )
        .unwrap();
        assert!(product.is_in_favorite);
        assert_eq!(product.count_in_cart, Some(3));
    }
}
