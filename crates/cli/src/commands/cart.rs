//! Cart commands.

use std::io::Write;

use lumen_core::{Cart, ProductId};
use lumen_storefront::ui::AssetResolver;
use lumen_storefront::viewmodels::QuantityChange;

use super::{CliError, Context};

/// Print the cart lines and totals.
pub async fn show(ctx: &Context) -> Result<(), CliError> {
    let cart = ctx.cart.load().await?;
    print_cart(&mut std::io::stdout().lock(), &cart, &ctx.assets)?;
    Ok(())
}

/// Set the quantity of one product.
pub async fn set(ctx: &Context, product_id: &ProductId, quantity: u32) -> Result<(), CliError> {
    let change = ctx.cart.set_quantity(product_id, quantity).await?;

    let mut out = std::io::stdout().lock();
    match change {
        QuantityChange::Applied { quantity: 0 } => {
            writeln!(out, "Removed {product_id} from the cart")?;
        }
        QuantityChange::Applied { quantity } => {
            writeln!(out, "{product_id}: {quantity} in cart")?;
        }
        QuantityChange::Superseded => {
            writeln!(out, "{product_id}: superseded by a newer change")?;
        }
    }
    writeln!(out, "Cart items: {}", ctx.cart.count())?;
    Ok(())
}

/// Print the header badge count.
pub async fn count(ctx: &Context) -> Result<(), CliError> {
    let count = ctx.cart.refresh_count().await?;
    writeln!(std::io::stdout(), "{count}")?;
    Ok(())
}

fn print_cart(out: &mut impl Write, cart: &Cart, assets: &AssetResolver) -> std::io::Result<()> {
    if cart.is_empty() {
        return writeln!(out, "Your cart is empty");
    }

    for item in &cart.items {
        let product = &item.product;
        writeln!(
            out,
            "{:>3} x {}  [{}]  {}",
            item.quantity, product.name, product.id, product.price
        )?;
        if let Some(image) = assets.image_url(&product.image) {
            writeln!(out, "      {image}")?;
        }
    }

    let totals = cart.totals();
    writeln!(out, "Items:    {}", totals.total_count)?;
    writeln!(out, "Subtotal: {}", totals.merchandise_subtotal)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lumen_core::{CartItem, CartProduct, Price};

    use super::*;

    fn assets() -> AssetResolver {
        AssetResolver::new("https://lumen.shop/images/products/".parse().unwrap())
    }

    #[test]
    fn test_print_empty_cart() {
        let mut out = Vec::new();
        print_cart(&mut out, &Cart::default(), &assets()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Your cart is empty\n");
    }

    #[test]
    fn test_print_cart_lines_and_subtotal() {
        let cart = Cart {
            items: vec![CartItem {
                product: CartProduct {
                    id: ProductId::from("p1"),
                    name: "Monstera".to_string(),
                    url: "monstera".to_string(),
                    image: "monstera.jpg".to_string(),
                    price: Price::from_units(1200),
                },
                quantity: 2,
            }],
        };

        let mut out = Vec::new();
        print_cart(&mut out, &cart, &assets()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("2 x Monstera  [p1]"));
        assert!(text.contains("https://lumen.shop/images/products/monstera.jpg"));
        assert!(text.contains("Items:    2"));
        assert!(text.contains("Subtotal: 2400"));
    }
}
