//! Cart view-model.
//!
//! Holds the latest cart snapshot, a per-product mirror of the quantities the
//! customer has committed, and the header badge count. Every change is sent
//! to the backend first; local state follows the acknowledgement.

use std::collections::HashMap;

use lumen_core::{Cart, CartTotals, ProductId};
use tokio::sync::{RwLock, watch};

use super::sequence::RequestSequence;
use crate::api::Backend;
use crate::error::{Result, add_breadcrumb};
use crate::ui::{Ui, notices};

/// Outcome of [`CartViewModel::set_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The backend accepted the quantity and local state now reflects it.
    Applied { quantity: u32 },
    /// A newer change for the same product was issued while this one was in
    /// flight; its response was discarded.
    Superseded,
}

#[derive(Debug, Default)]
struct CartState {
    cart: Option<Cart>,
    in_cart: HashMap<ProductId, u32>,
    sequence: RequestSequence,
}

impl CartState {
    fn replace_cart(&mut self, cart: Cart) -> u32 {
        self.in_cart = cart
            .items
            .iter()
            .map(|item| (item.product.id.clone(), item.quantity))
            .collect();
        let count = cart.totals().total_count;
        self.cart = Some(cart);
        count
    }
}

/// Cart state shared by every view that shows or changes the cart.
pub struct CartViewModel<B> {
    backend: B,
    ui: Ui,
    state: RwLock<CartState>,
    count: watch::Sender<u32>,
}

impl<B: Backend> CartViewModel<B> {
    #[must_use]
    pub fn new(backend: B, ui: Ui) -> Self {
        let (count, _rx) = watch::channel(0);
        Self {
            backend,
            ui,
            state: RwLock::new(CartState::default()),
            count,
        }
    }

    /// Fetch the cart and make it the current snapshot.
    ///
    /// An empty cart is returned as such; views that cannot work with one
    /// decide what to do about it.
    ///
    /// # Errors
    ///
    /// Returns the backend error after showing it as a notice.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Result<Cart> {
        let cart = match self.backend.get_cart().await {
            Ok(cart) => cart,
            Err(err) => {
                self.ui.notify_error(&err, notices::CART_LOAD_FAILED);
                return Err(err);
            }
        };

        let count = self.state.write().await.replace_cart(cart.clone());
        self.count.send_replace(count);
        tracing::debug!(lines = cart.items.len(), count, "Cart loaded");
        Ok(cart)
    }

    /// Set the absolute quantity of `product_id`; 0 removes it.
    ///
    /// # Errors
    ///
    /// Returns the backend error after showing it as a notice. State is left
    /// as it was.
    #[tracing::instrument(skip(self), fields(product_id = %product_id))]
    pub async fn set_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<QuantityChange> {
        let quantity_str = quantity.to_string();
        add_breadcrumb(
            "cart",
            "Set quantity",
            Some(&[
                ("product_id", product_id.as_str()),
                ("quantity", &quantity_str),
            ]),
        );

        let ticket = self.state.write().await.sequence.issue(product_id);

        let cart = match self
            .backend
            .set_cart_line_quantity(product_id, quantity)
            .await
        {
            Ok(cart) => cart,
            Err(err) => {
                self.ui.notify_error(&err, notices::CART_UPDATE_FAILED);
                return Err(err);
            }
        };

        let mut state = self.state.write().await;
        if !state.sequence.is_current(&ticket) {
            tracing::debug!(quantity, "Discarding superseded cart response");
            return Ok(QuantityChange::Superseded);
        }

        let count = state.replace_cart(cart);
        if quantity == 0 {
            state.in_cart.remove(product_id);
        } else {
            state.in_cart.insert(product_id.clone(), quantity);
        }
        drop(state);

        self.count.send_replace(count);
        Ok(QuantityChange::Applied { quantity })
    }

    /// Quantity of `product_id` the customer has in the cart, 0 when absent.
    pub async fn quantity_in_cart(&self, product_id: &ProductId) -> u32 {
        self.state
            .read()
            .await
            .in_cart
            .get(product_id)
            .copied()
            .unwrap_or(0)
    }

    /// The last cart the backend returned, if any was loaded.
    pub async fn snapshot(&self) -> Option<Cart> {
        self.state.read().await.cart.clone()
    }

    /// Totals of the current snapshot; zero before the first load.
    pub async fn totals(&self) -> CartTotals {
        self.state
            .read()
            .await
            .cart
            .as_ref()
            .map(Cart::totals)
            .unwrap_or_default()
    }

    /// Current header badge count.
    #[must_use]
    pub fn count(&self) -> u32 {
        *self.count.borrow()
    }

    /// A receiver that observes every badge count change.
    #[must_use]
    pub fn subscribe_count(&self) -> watch::Receiver<u32> {
        self.count.subscribe()
    }

    /// Overwrite the badge count, e.g. to 0 after an order was placed.
    pub fn set_count(&self, count: u32) {
        self.count.send_replace(count);
    }

    /// Fetch the badge count from the backend.
    ///
    /// # Errors
    ///
    /// Returns the backend error. The badge is not worth a notice, so the
    /// failure is only logged.
    pub async fn refresh_count(&self) -> Result<u32> {
        let count = self
            .backend
            .get_cart_count()
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "Failed to refresh cart count"))?
            .count;
        self.count.send_replace(count);
        Ok(count)
    }
}
