//! Cart snapshot and totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// The product summary embedded in a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    pub url: String,
    pub image: String,
    pub price: Price,
}

/// A (product, quantity) pair within a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: CartProduct,
    pub quantity: u32,
}

/// The backend's cart, lines in insertion order.
///
/// Each product appears at most once. A product with quantity 0 is simply
/// absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Cart {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl Cart {
    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line for `product_id`, if the product is in the cart.
    #[must_use]
    pub fn line(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.product.id == product_id)
    }

    /// Quantity of `product_id` in the cart, 0 when absent.
    #[must_use]
    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.line(product_id).map_or(0, |item| item.quantity)
    }

    /// Summary totals for this cart.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        compute_totals(self)
    }
}

/// Aggregates shown in the checkout summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartTotals {
    /// Number of units across all lines, capped at `u32::MAX`.
    pub total_count: u32,
    /// Sum of `quantity + price` over all lines.
    ///
    /// This is what the checkout summary has always displayed. It is not a
    /// priced total; see [`CartTotals::merchandise_subtotal`].
    pub total_amount: Decimal,
    /// Sum of `quantity * price` over all lines.
    pub merchandise_subtotal: Price,
}

/// Compute the checkout summary for `cart`.
#[must_use]
pub fn compute_totals(cart: &Cart) -> CartTotals {
    cart.items
        .iter()
        .fold(CartTotals::default(), |totals, item| CartTotals {
            total_count: totals.total_count.saturating_add(item.quantity),
            total_amount: totals.total_amount
                + Decimal::from(item.quantity)
                + item.product.price.amount(),
            merchandise_subtotal: totals.merchandise_subtotal + item.product.price * item.quantity,
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, quantity: u32, price: i64) -> CartItem {
        CartItem {
            product: CartProduct {
                id: ProductId::from(id),
                name: format!("Plant {id}"),
                url: id.to_string(),
                image: format!("{id}.jpg"),
                price: Price::from_units(price),
            },
            quantity,
        }
    }

    #[test]
    fn test_total_count_sums_quantities() {
        let cart = Cart {
            items: vec![line("a", 2, 10), line("b", 1, 5)],
        };
        assert_eq!(compute_totals(&cart).total_count, 3);
    }

    #[test]
    fn test_total_count_saturates() {
        let cart = Cart {
            items: vec![line("a", u32::MAX, 10), line("b", 1, 5)],
        };
        assert_eq!(compute_totals(&cart).total_count, u32::MAX);
    }

    #[test]
    fn test_total_amount_adds_quantity_to_price() {
        // (2 + 10) + (1 + 5)
        let cart = Cart {
            items: vec![line("a", 2, 10), line("b", 1, 5)],
        };
        assert_eq!(compute_totals(&cart).total_amount, Decimal::from(18));
    }

    #[test]
    fn test_total_amount_differs_from_priced_subtotal() {
        let cart = Cart {
            items: vec![line("a", 2, 10), line("b", 1, 5)],
        };
        let totals = compute_totals(&cart);
        assert_eq!(totals.merchandise_subtotal, Price::from_units(25));
        assert_ne!(totals.total_amount, totals.merchandise_subtotal.amount());
    }

    #[test]
    fn test_empty_cart_totals_are_zero() {
        let totals = Cart::default().totals();
        assert_eq!(totals, CartTotals::default());
        assert!(Cart::default().is_empty());
    }

    #[test]
    fn test_quantity_of_missing_product_is_zero() {
        let cart = Cart {
            items: vec![line("a", 4, 10)],
        };
        assert_eq!(cart.quantity_of(&ProductId::from("a")), 4);
        assert_eq!(cart.quantity_of(&ProductId::from("zz")), 0);
    }

    #[test]
    fn test_deserialize_backend_cart() {
        let cart: Cart = serde_json::from_str(
            r#"{"items":[{"product":{"id":"p1","name":"Ficus","url":"ficus","image":"ficus.jpg","price":890},"quantity":2}]}"#,
        )
        .unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.quantity_of(&ProductId::from("p1")), 2);
    }
}
