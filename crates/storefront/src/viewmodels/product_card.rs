//! A single product tile.

use std::sync::Arc;

use lumen_core::Product;
use url::Url;

use super::cart::{CartViewModel, QuantityChange};
use super::favorites::FavoritesViewModel;
use crate::api::Backend;
use crate::error::{ClientError, Result};
use crate::session::AuthState;
use crate::ui::{AssetResolver, Route, Ui, notices};

/// One product with its quantity selector. All changes go through the cart
/// and favorites view-models; the card only keeps the selector value and the
/// last acknowledged cart quantity.
pub struct ProductCard<B> {
    product: Product,
    light: bool,
    count: u32,
    count_in_cart: u32,
    cart: Arc<CartViewModel<B>>,
    favorites: Arc<FavoritesViewModel<B>>,
    auth: AuthState,
    ui: Ui,
}

impl<B: Backend> ProductCard<B> {
    /// A card for `product`. In `light` mode the whole card links to the
    /// product page.
    #[must_use]
    pub fn new(
        product: Product,
        light: bool,
        cart: Arc<CartViewModel<B>>,
        favorites: Arc<FavoritesViewModel<B>>,
        auth: AuthState,
        ui: Ui,
    ) -> Self {
        let count_in_cart = product.count_in_cart.unwrap_or(0);
        Self {
            product,
            light,
            count: count_in_cart.max(1),
            count_in_cart,
            cart,
            favorites,
            auth,
            ui,
        }
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn is_light(&self) -> bool {
        self.light
    }

    /// Quantity selector value.
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }

    #[must_use]
    pub const fn count_in_cart(&self) -> u32 {
        self.count_in_cart
    }

    #[must_use]
    pub const fn is_in_cart(&self) -> bool {
        self.count_in_cart > 0
    }

    /// Put the selected count into the cart. Nothing is sent for a count of 0.
    ///
    /// # Errors
    ///
    /// Returns the cart error; the selector keeps its value.
    pub async fn add_to_cart(&mut self) -> Result<Option<QuantityChange>> {
        if self.count == 0 {
            return Ok(None);
        }
        self.send_count().await.map(Some)
    }

    /// Change the selector; if the product is in the cart the cart follows.
    ///
    /// # Errors
    ///
    /// Returns the cart error; the selector keeps the new value.
    pub async fn update_count(&mut self, count: u32) -> Result<Option<QuantityChange>> {
        self.count = count;
        if !self.is_in_cart() || count == 0 {
            return Ok(None);
        }
        self.send_count().await.map(Some)
    }

    async fn send_count(&mut self) -> Result<QuantityChange> {
        let change = self.cart.set_quantity(&self.product.id, self.count).await?;
        if let QuantityChange::Applied { quantity } = change {
            self.count_in_cart = quantity;
        }
        Ok(change)
    }

    /// Take the product out of the cart and reset the selector to 1.
    ///
    /// # Errors
    ///
    /// Returns the cart error; the card is left as it was.
    pub async fn remove_from_cart(&mut self) -> Result<QuantityChange> {
        let change = self.cart.set_quantity(&self.product.id, 0).await?;
        if change != QuantityChange::Superseded {
            self.count_in_cart = 0;
            self.count = 1;
        }
        Ok(change)
    }

    /// Add or remove the product from favorites and return the new state.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Unauthenticated`] for guests, after a sign-in notice;
    ///   nothing is sent
    /// - the favorites error otherwise
    pub async fn toggle_favorite(&mut self) -> Result<bool> {
        if !self.auth.is_authenticated() {
            self.ui.notify(notices::FAVORITES_REQUIRE_LOGIN);
            return Err(ClientError::Unauthenticated);
        }

        if self.product.is_in_favorite {
            self.favorites.remove(&self.product.id).await?;
        } else {
            self.favorites.add(&self.product.id).await?;
        }
        self.product.is_in_favorite = !self.product.is_in_favorite;
        Ok(self.product.is_in_favorite)
    }

    /// Follow the card link. Only light cards navigate; returns whether this
    /// one did.
    pub fn open(&self) -> bool {
        if !self.light {
            return false;
        }
        self.ui.navigate(&Route::Product(self.product.url.clone()));
        true
    }

    #[must_use]
    pub fn image_url(&self, assets: &AssetResolver) -> Option<Url> {
        assets.image_url(&self.product.image)
    }
}
