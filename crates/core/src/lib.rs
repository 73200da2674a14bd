//! Lumen Core - Shared domain types.
//!
//! This crate provides the types exchanged between the Lumen storefront
//! client and its backend. It is used by:
//! - `storefront` - View-models for cart, favorites, checkout and profile
//! - `cli` - Command-line front end driving those view-models
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async runtime. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Ids, prices, emails, catalog/cart/order/profile payloads

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
