//! Cart flows against a live backend.
//!
//! These tests require:
//! - A running backend at `LUMEN_TEST_API_URL`
//! - `LUMEN_TEST_PRODUCT_ID` naming an in-stock product

use lumen_core::ProductId;
use lumen_integration_tests::{TestContext, product_id};
use lumen_storefront::error::ClientError;
use lumen_storefront::viewmodels::QuantityChange;
use uuid::Uuid;

#[tokio::test]
#[ignore = "Requires running backend"]
async fn test_guest_cart_starts_empty() {
    let ctx = TestContext::guest();

    let cart = ctx.cart.load().await.expect("Failed to load cart");

    assert!(cart.is_empty());
    assert_eq!(ctx.cart.count(), 0);
}

#[tokio::test]
#[ignore = "Requires running backend and LUMEN_TEST_PRODUCT_ID"]
async fn test_set_and_clear_quantity() {
    let ctx = TestContext::guest();
    let id = product_id();

    let change = ctx.cart.set_quantity(&id, 2).await.expect("Failed to add");
    assert_eq!(change, QuantityChange::Applied { quantity: 2 });
    assert_eq!(ctx.cart.quantity_in_cart(&id).await, 2);
    assert_eq!(ctx.cart.refresh_count().await.expect("Failed to count"), 2);

    let cart = ctx.cart.load().await.expect("Failed to reload cart");
    assert_eq!(cart.quantity_of(&id), 2);
    assert_eq!(cart.totals().total_count, 2);

    ctx.cart.set_quantity(&id, 0).await.expect("Failed to remove");
    assert_eq!(ctx.cart.quantity_in_cart(&id).await, 0);
    assert!(ctx.cart.snapshot().await.is_some_and(|cart| cart.is_empty()));
}

#[tokio::test]
#[ignore = "Requires running backend"]
async fn test_unknown_product_is_rejected() {
    let ctx = TestContext::guest();
    let id = ProductId::new(Uuid::new_v4().simple().to_string());

    let result = ctx.cart.set_quantity(&id, 1).await;

    assert!(matches!(
        result,
        Err(ClientError::Domain(_) | ClientError::Status { .. })
    ));
    assert_eq!(ctx.collected.notices().len(), 1);
    assert_eq!(ctx.cart.quantity_in_cart(&id).await, 0);
}
