//! Favorites view-model.
//!
//! Lists the customer's favorite products next to the quantity they have in
//! the cart. Each entry carries two numbers: `count`, the value of the
//! quantity selector, and `count_in_cart`, what the cart actually holds.
//! Cart changes go through [`CartViewModel`] so the badge stays in sync.

use std::sync::Arc;

use lumen_core::{Cart, FavoriteProduct, ProductId};
use tokio::sync::RwLock;

use super::cart::{CartViewModel, QuantityChange};
use crate::api::Backend;
use crate::error::{Result, add_breadcrumb};
use crate::ui::{Ui, notices};

/// One row of the favorites list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub product: FavoriteProduct,
    /// Quantity selector value, at least 1 when shown.
    pub count: u32,
    /// Quantity of this product in the cart.
    pub count_in_cart: u32,
}

impl FavoriteEntry {
    /// Build an entry seeded from the quantity already in the cart.
    #[must_use]
    pub fn new(product: FavoriteProduct, count_in_cart: u32) -> Self {
        Self {
            product,
            count: count_in_cart.max(1),
            count_in_cart,
        }
    }

    #[must_use]
    pub const fn is_in_cart(&self) -> bool {
        self.count_in_cart > 0
    }
}

fn merge(favorites: Vec<FavoriteProduct>, cart: &Cart) -> Vec<FavoriteEntry> {
    favorites
        .into_iter()
        .map(|product| {
            let in_cart = cart.quantity_of(&product.id);
            FavoriteEntry::new(product, in_cart)
        })
        .collect()
}

pub struct FavoritesViewModel<B> {
    backend: B,
    cart: Arc<CartViewModel<B>>,
    ui: Ui,
    entries: RwLock<Vec<FavoriteEntry>>,
}

impl<B: Backend> FavoritesViewModel<B> {
    #[must_use]
    pub fn new(backend: B, cart: Arc<CartViewModel<B>>, ui: Ui) -> Self {
        Self {
            backend,
            cart,
            ui,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Fetch favorites and the cart, and merge them into entries.
    ///
    /// # Errors
    ///
    /// Returns the first backend error after showing it as a notice. Entries
    /// are only replaced when both fetches succeed.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<FavoriteEntry>> {
        let favorites = match self.backend.get_favorites().await {
            Ok(favorites) => favorites,
            Err(err) => {
                self.ui.notify_error(&err, notices::FAVORITES_LOAD_FAILED);
                return Err(err);
            }
        };
        let cart = self.cart.load().await?;

        let entries = merge(favorites, &cart);
        *self.entries.write().await = entries.clone();
        tracing::debug!(count = entries.len(), "Favorites loaded");
        Ok(entries)
    }

    /// The entries as of the last successful change.
    pub async fn entries(&self) -> Vec<FavoriteEntry> {
        self.entries.read().await.clone()
    }

    pub async fn entry(&self, product_id: &ProductId) -> Option<FavoriteEntry> {
        self.entries
            .read()
            .await
            .iter()
            .find(|entry| &entry.product.id == product_id)
            .cloned()
    }

    /// Put the selected `count` of `product_id` into the cart.
    ///
    /// Returns `Ok(None)` without contacting the backend when the product is
    /// not listed or its count is 0.
    ///
    /// # Errors
    ///
    /// Returns the cart error; the selected count is kept.
    pub async fn add_to_cart(&self, product_id: &ProductId) -> Result<Option<QuantityChange>> {
        let count = self.entry(product_id).await.map_or(0, |entry| entry.count);
        if count == 0 {
            tracing::debug!(product_id = %product_id, "Nothing selected, not adding to cart");
            return Ok(None);
        }

        let change = self.cart.set_quantity(product_id, count).await?;
        if let QuantityChange::Applied { quantity } = change {
            self.update_entry(product_id, |entry| entry.count_in_cart = quantity)
                .await;
        }
        Ok(Some(change))
    }

    /// Change the selected count; a product already in the cart follows it.
    ///
    /// # Errors
    ///
    /// Returns the cart error. The selector keeps the new value either way.
    pub async fn update_count(
        &self,
        product_id: &ProductId,
        count: u32,
    ) -> Result<Option<QuantityChange>> {
        let Some(entry) = self
            .update_entry(product_id, |entry| entry.count = count)
            .await
        else {
            return Ok(None);
        };
        if !entry.is_in_cart() || count == 0 {
            return Ok(None);
        }

        let change = self.cart.set_quantity(product_id, count).await?;
        if let QuantityChange::Applied { quantity } = change {
            self.update_entry(product_id, |entry| entry.count_in_cart = quantity)
                .await;
        }
        Ok(Some(change))
    }

    /// Take `product_id` out of the cart and reset its selector.
    ///
    /// # Errors
    ///
    /// Returns the cart error; the entry is left unchanged.
    pub async fn remove_from_cart(&self, product_id: &ProductId) -> Result<QuantityChange> {
        let change = self.cart.set_quantity(product_id, 0).await?;
        if change != QuantityChange::Superseded {
            self.update_entry(product_id, |entry| {
                entry.count_in_cart = 0;
                entry.count = 1;
            })
            .await;
        }
        Ok(change)
    }

    /// Add `product_id` to the favorites.
    ///
    /// # Errors
    ///
    /// Returns the backend error after showing it as a notice.
    #[tracing::instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add(&self, product_id: &ProductId) -> Result<()> {
        add_breadcrumb(
            "favorites",
            "Add favorite",
            Some(&[("product_id", product_id.as_str())]),
        );

        let favorites = match self.backend.add_favorite(product_id).await {
            Ok(favorites) => favorites,
            Err(err) => {
                self.ui.notify_error(&err, notices::FAVORITES_UPDATE_FAILED);
                return Err(err);
            }
        };

        let mut entries = self.entries.write().await;
        let mut merged = Vec::with_capacity(favorites.len());
        for product in favorites {
            if let Some(index) = entries.iter().position(|e| e.product.id == product.id) {
                merged.push(entries.swap_remove(index));
            } else {
                let in_cart = self.cart.quantity_in_cart(&product.id).await;
                merged.push(FavoriteEntry::new(product, in_cart));
            }
        }
        *entries = merged;
        Ok(())
    }

    /// Remove `product_id` from the favorites and drop exactly one matching
    /// entry from the list. The cart is not touched.
    ///
    /// # Errors
    ///
    /// Returns the backend error after showing it as a notice; the list is
    /// left unchanged.
    #[tracing::instrument(skip(self), fields(product_id = %product_id))]
    pub async fn remove(&self, product_id: &ProductId) -> Result<()> {
        add_breadcrumb(
            "favorites",
            "Remove favorite",
            Some(&[("product_id", product_id.as_str())]),
        );

        if let Err(err) = self.backend.remove_favorite(product_id).await {
            self.ui.notify_error(&err, notices::FAVORITES_UPDATE_FAILED);
            return Err(err);
        }

        let mut entries = self.entries.write().await;
        if let Some(index) = entries.iter().position(|e| &e.product.id == product_id) {
            entries.remove(index);
        }
        Ok(())
    }

    /// Apply `f` to the entry for `product_id` and return the result.
    async fn update_entry(
        &self,
        product_id: &ProductId,
        f: impl FnOnce(&mut FavoriteEntry),
    ) -> Option<FavoriteEntry> {
        let mut entries = self.entries.write().await;
        let entry = entries.iter_mut().find(|e| &e.product.id == product_id)?;
        f(entry);
        Some(entry.clone())
    }
}
