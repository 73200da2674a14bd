//! Lumen storefront client library.
//!
//! View-models for the storefront's cart, favorites, checkout and profile
//! views, the [`api::Backend`] they talk to, and the REST client that
//! implements it. Rendering is left to the front end, which plugs in through
//! the traits in [`ui`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod form;
pub mod session;
pub mod ui;
pub mod viewmodels;

#[cfg(test)]
mod testing;
