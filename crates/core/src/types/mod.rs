//! Core types for Lumen.
//!
//! This module provides type-safe wrappers and wire payloads for the
//! storefront domain.

pub mod cart;
pub mod email;
pub mod fulfillment;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod response;
pub mod user_info;

pub use cart::{Cart, CartItem, CartProduct, CartTotals, compute_totals};
pub use email::{Email, EmailError};
pub use fulfillment::*;
pub use id::*;
pub use order::{Order, OrderAcknowledgement, OrderPayload};
pub use price::Price;
pub use product::{FavoriteProduct, Product};
pub use response::{CartCount, ErrorResponse};
pub use user_info::{UserInfo, UserInfoPayload};
