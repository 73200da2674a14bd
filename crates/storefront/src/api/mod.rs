//! Backend API access.
//!
//! # Architecture
//!
//! - [`Backend`] is the contract the view-models consume; every call returns
//!   the success payload or a [`ClientError`]
//! - [`HttpBackend`] implements it over the REST API with `reqwest`
//! - The backend is the source of truth: nothing is cached, every mutation
//!   is sent immediately and view state follows the acknowledgement
//!
//! # Example
//!
//! ```rust,ignore
//! use lumen_storefront::api::{Backend, HttpBackend};
//!
//! let backend = HttpBackend::new(&config)?;
//! let cart = backend.set_cart_line_quantity(&product_id, 2).await?;
//! ```

mod http;

use std::future::Future;
use std::sync::Arc;

use lumen_core::{
    Cart, CartCount, ErrorResponse, FavoriteProduct, Order, OrderPayload, ProductId, UserInfo,
    UserInfoPayload,
};

pub use http::HttpBackend;

use crate::error::ClientError;

/// Backend operations used by the storefront view-models.
pub trait Backend: Send + Sync {
    /// `GET cart`
    fn get_cart(&self) -> impl Future<Output = Result<Cart, ClientError>> + Send;

    /// `POST cart` with the absolute quantity; 0 removes the line.
    fn set_cart_line_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> impl Future<Output = Result<Cart, ClientError>> + Send;

    /// `GET cart/count`
    fn get_cart_count(&self) -> impl Future<Output = Result<CartCount, ClientError>> + Send;

    /// `GET favorites`
    fn get_favorites(
        &self,
    ) -> impl Future<Output = Result<Vec<FavoriteProduct>, ClientError>> + Send;

    /// `POST favorites`
    fn add_favorite(
        &self,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<Vec<FavoriteProduct>, ClientError>> + Send;

    /// `DELETE favorites`
    fn remove_favorite(
        &self,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<ErrorResponse, ClientError>> + Send;

    /// `POST orders`
    fn create_order(
        &self,
        payload: &OrderPayload,
    ) -> impl Future<Output = Result<Order, ClientError>> + Send;

    /// `GET users`
    fn get_user_info(&self) -> impl Future<Output = Result<UserInfo, ClientError>> + Send;

    /// `POST users`
    fn update_user_info(
        &self,
        payload: &UserInfoPayload,
    ) -> impl Future<Output = Result<ErrorResponse, ClientError>> + Send;
}

impl<T: Backend> Backend for Arc<T> {
    fn get_cart(&self) -> impl Future<Output = Result<Cart, ClientError>> + Send {
        (**self).get_cart()
    }

    fn set_cart_line_quantity(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> impl Future<Output = Result<Cart, ClientError>> + Send {
        (**self).set_cart_line_quantity(product_id, quantity)
    }

    fn get_cart_count(&self) -> impl Future<Output = Result<CartCount, ClientError>> + Send {
        (**self).get_cart_count()
    }

    fn get_favorites(
        &self,
    ) -> impl Future<Output = Result<Vec<FavoriteProduct>, ClientError>> + Send {
        (**self).get_favorites()
    }

    fn add_favorite(
        &self,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<Vec<FavoriteProduct>, ClientError>> + Send {
        (**self).add_favorite(product_id)
    }

    fn remove_favorite(
        &self,
        product_id: &ProductId,
    ) -> impl Future<Output = Result<ErrorResponse, ClientError>> + Send {
        (**self).remove_favorite(product_id)
    }

    fn create_order(
        &self,
        payload: &OrderPayload,
    ) -> impl Future<Output = Result<Order, ClientError>> + Send {
        (**self).create_order(payload)
    }

    fn get_user_info(&self) -> impl Future<Output = Result<UserInfo, ClientError>> + Send {
        (**self).get_user_info()
    }

    fn update_user_info(
        &self,
        payload: &UserInfoPayload,
    ) -> impl Future<Output = Result<ErrorResponse, ClientError>> + Send {
        (**self).update_user_info(payload)
    }
}
