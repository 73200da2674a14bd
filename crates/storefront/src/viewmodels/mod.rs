//! Storefront view-models.
//!
//! Each view-model owns its state and exposes it through accessors; none of
//! them render anything. Backend calls are awaited without holding any state
//! lock, so several actions can be in flight at once.
//!
//! - [`CartViewModel`] is shared: favorites, product cards and checkout all
//!   change the cart through it, which keeps the header badge in sync
//! - [`FavoritesViewModel`] merges favorites with cart quantities
//! - [`OrderController`] runs checkout over an [`OrderForm`]
//! - [`ProfileController`] edits the saved profile that prefills checkout
//! - [`ProductCard`] is a single product tile

mod cart;
mod favorites;
mod order;
mod product_card;
mod profile;
mod sequence;

pub use cart::{CartViewModel, QuantityChange};
pub use favorites::{FavoriteEntry, FavoritesViewModel};
pub use order::{CheckoutEntry, OrderController, OrderForm};
pub use product_card::ProductCard;
pub use profile::{ProfileController, ProfileForm, prefill_order_form};
pub use sequence::{RequestSequence, Ticket};
