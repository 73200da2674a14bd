//! Favorites commands.

use std::io::Write;

use lumen_core::ProductId;
use lumen_storefront::ui::notices;
use lumen_storefront::viewmodels::{FavoriteEntry, QuantityChange};

use super::{CliError, Context, require_sign_in};

/// List favorites with the quantity of each in the cart.
pub async fn list(ctx: &Context) -> Result<(), CliError> {
    let entries = ctx.favorites().list().await?;
    print_entries(&mut std::io::stdout().lock(), &entries)?;
    Ok(())
}

pub async fn add(ctx: &Context, product_id: &ProductId) -> Result<(), CliError> {
    require_sign_in(ctx, notices::FAVORITES_REQUIRE_LOGIN)?;
    ctx.favorites().add(product_id).await?;
    writeln!(std::io::stdout(), "Added {product_id} to favorites")?;
    Ok(())
}

pub async fn remove(ctx: &Context, product_id: &ProductId) -> Result<(), CliError> {
    require_sign_in(ctx, notices::FAVORITES_REQUIRE_LOGIN)?;
    let favorites = ctx.favorites();
    favorites.list().await?;
    favorites.remove(product_id).await?;
    print_entries(&mut std::io::stdout().lock(), &favorites.entries().await)?;
    Ok(())
}

/// Put a favorite into the cart, optionally changing its count first.
pub async fn to_cart(
    ctx: &Context,
    product_id: &ProductId,
    count: Option<u32>,
) -> Result<(), CliError> {
    let favorites = ctx.favorites();
    favorites.list().await?;
    if favorites.entry(product_id).await.is_none() {
        return Err(CliError::NotFavorite(product_id.clone()));
    }

    // A favorite already in the cart follows its count immediately
    let resent = match count {
        Some(count) => favorites.update_count(product_id, count).await?,
        None => None,
    };
    let change = match resent {
        Some(change) => Some(change),
        None => favorites.add_to_cart(product_id).await?,
    };

    let mut out = std::io::stdout().lock();
    match change {
        Some(QuantityChange::Applied { quantity }) => {
            writeln!(out, "{product_id}: {quantity} in cart")?;
        }
        Some(QuantityChange::Superseded) => {
            writeln!(out, "{product_id}: superseded by a newer change")?;
        }
        None => writeln!(out, "Nothing to add: count is 0")?,
    }
    Ok(())
}

fn print_entries(out: &mut impl Write, entries: &[FavoriteEntry]) -> std::io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No favorites yet");
    }
    for entry in entries {
        let product = &entry.product;
        write!(out, "{}  [{}]  {}", product.name, product.id, product.price)?;
        if entry.is_in_cart() {
            write!(out, "  (in cart: {})", entry.count_in_cart)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
