//! Checkout command.

use std::io::Write;

use lumen_storefront::error::ClientError;
use lumen_storefront::viewmodels::{CheckoutEntry, OrderController, OrderForm};

use super::{CliError, Context, fill_fields};
use crate::{ContactArgs, OrderArgs};

/// Validate and submit an order for the current cart.
///
/// Signed-in customers start from their saved profile; flags override it.
pub async fn place(ctx: &Context, args: OrderArgs) -> Result<(), CliError> {
    let mut controller = OrderController::new(
        ctx.backend.clone(),
        ctx.cart.clone(),
        ctx.auth.clone(),
        ctx.ui.clone(),
    );

    let totals = match controller.enter().await? {
        CheckoutEntry::Ready(totals) => totals,
        CheckoutEntry::CartEmpty => return Ok(()),
    };

    apply_args(controller.form_mut(), args);

    let order = match controller.create_order().await {
        Ok(order) => order,
        Err(ClientError::Validation(errors)) => {
            let mut err = std::io::stderr().lock();
            for name in errors.fields() {
                if let Some(error) = errors.get(name) {
                    let flag = if name == "payment_type" { "payment" } else { name };
                    writeln!(err, "  --{}: {error}", flag.replace('_', "-"))?;
                }
            }
            return Err(ClientError::Validation(errors).into());
        }
        Err(e) => return Err(e.into()),
    };

    {
        let mut out = std::io::stdout().lock();
        if let Some(id) = &order.id {
            writeln!(out, "Order {id}")?;
        }
        writeln!(
            out,
            "{} items, {} ({})",
            totals.total_count, totals.merchandise_subtotal, order.details.delivery_type
        )?;
    }

    controller.dismiss_confirmation();
    Ok(())
}

fn apply_args(form: &mut OrderForm, args: OrderArgs) {
    let OrderArgs {
        delivery,
        contact,
        comment,
    } = args;

    if let Some(delivery_type) = delivery {
        form.set_delivery_type(delivery_type);
    }
    if let Some(payment) = contact.payment {
        form.set_payment_type(Some(payment));
    }
    fill_fields([
        (&mut form.first_name, contact.first_name),
        (&mut form.last_name, contact.last_name),
        (&mut form.father_name, contact.father_name),
        (&mut form.phone, contact.phone),
        (&mut form.email, contact.email),
        (&mut form.comment, comment),
    ]);

    // Address flags are meaningless for pickup orders
    if form.delivery_type().requires_address() {
        fill_fields([
            (&mut form.street, contact.street),
            (&mut form.house, contact.house),
            (&mut form.entrance, contact.entrance),
            (&mut form.apartment, contact.apartment),
        ]);
    }
}
