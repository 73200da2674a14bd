//! Checkout flows against a live backend.
//!
//! These tests require:
//! - A running backend at `LUMEN_TEST_API_URL`
//! - `LUMEN_TEST_PRODUCT_ID` naming an in-stock product
//!
//! The pickup test places a real order.

use lumen_core::{DeliveryType, PaymentType};
use lumen_integration_tests::{TestContext, product_id};
use lumen_storefront::error::ClientError;
use lumen_storefront::ui::Route;
use lumen_storefront::viewmodels::{CheckoutEntry, OrderController};

fn controller(ctx: &TestContext) -> OrderController<lumen_storefront::api::HttpBackend> {
    OrderController::new(
        ctx.backend.clone(),
        ctx.cart.clone(),
        ctx.auth.clone(),
        ctx.ui.clone(),
    )
}

#[tokio::test]
#[ignore = "Requires running backend"]
async fn test_empty_cart_sends_customer_home() {
    let ctx = TestContext::guest();
    let mut checkout = controller(&ctx);

    let entry = checkout.enter().await.expect("Failed to enter checkout");

    assert_eq!(entry, CheckoutEntry::CartEmpty);
    assert_eq!(ctx.collected.routes(), vec![Route::Home]);
}

#[tokio::test]
#[ignore = "Requires running backend and LUMEN_TEST_PRODUCT_ID"]
async fn test_incomplete_form_is_not_submitted() {
    let ctx = TestContext::guest();
    ctx.cart
        .set_quantity(&product_id(), 1)
        .await
        .expect("Failed to add product");
    let mut checkout = controller(&ctx);
    checkout.enter().await.expect("Failed to enter checkout");

    let result = checkout.create_order().await;

    assert!(matches!(result, Err(ClientError::Validation(_))));
    assert!(!ctx.collected.dialog_open());
}

#[tokio::test]
#[ignore = "Places a real order; requires running backend and LUMEN_TEST_PRODUCT_ID"]
async fn test_pickup_order() {
    let ctx = TestContext::guest();
    ctx.cart
        .set_quantity(&product_id(), 1)
        .await
        .expect("Failed to add product");
    let mut checkout = controller(&ctx);
    let entry = checkout.enter().await.expect("Failed to enter checkout");
    assert!(matches!(entry, CheckoutEntry::Ready(totals) if totals.total_count == 1));

    checkout.change_delivery_type(DeliveryType::Pickup);
    let form = checkout.form_mut();
    form.first_name.set_value("Integration");
    form.last_name.set_value("Test");
    form.phone.set_value("+79990000000");
    form.email.set_value("integration@lumen.shop");
    form.set_payment_type(Some(PaymentType::CardOnline));

    let order = checkout.create_order().await.expect("Failed to place order");

    assert_eq!(order.details.delivery_type, DeliveryType::Pickup);
    assert!(!order.details.has_address());
    assert!(ctx.collected.dialog_open());
    assert_eq!(ctx.cart.count(), 0);
}
