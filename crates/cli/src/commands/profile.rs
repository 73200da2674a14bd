//! Profile commands.

use std::io::Write;

use lumen_storefront::ui::notices;
use lumen_storefront::viewmodels::{ProfileController, ProfileForm};

use super::{CliError, Context, fill_fields, require_sign_in};
use crate::{ContactArgs, ProfileArgs};

pub async fn show(ctx: &Context) -> Result<(), CliError> {
    let mut controller =
        ProfileController::new(ctx.backend.clone(), ctx.auth.clone(), ctx.ui.clone());
    if !controller.load().await? {
        writeln!(std::io::stdout(), "Not signed in")?;
        return Ok(());
    }
    print_profile(&mut std::io::stdout().lock(), controller.form())?;
    Ok(())
}

/// Load the saved profile, apply the flags and save it back.
pub async fn save(ctx: &Context, args: ProfileArgs) -> Result<(), CliError> {
    require_sign_in(ctx, notices::PROFILE_REQUIRE_LOGIN)?;

    let mut controller =
        ProfileController::new(ctx.backend.clone(), ctx.auth.clone(), ctx.ui.clone());
    controller.load().await?;

    if let Some(delivery_type) = args.delivery {
        controller.change_delivery_type(delivery_type);
    }
    apply_args(controller.form_mut(), args.contact);

    controller.save().await?;
    Ok(())
}

fn apply_args(form: &mut ProfileForm, contact: ContactArgs) {
    if let Some(payment) = contact.payment {
        form.payment_type = payment;
        form.mark_dirty();
    }
    fill_fields([
        (&mut form.first_name, contact.first_name),
        (&mut form.last_name, contact.last_name),
        (&mut form.father_name, contact.father_name),
        (&mut form.phone, contact.phone),
        (&mut form.email, contact.email),
        (&mut form.street, contact.street),
        (&mut form.house, contact.house),
        (&mut form.entrance, contact.entrance),
        (&mut form.apartment, contact.apartment),
    ]);
}

fn print_profile(out: &mut impl Write, form: &ProfileForm) -> std::io::Result<()> {
    let rows = [
        ("First name", form.first_name.value()),
        ("Last name", form.last_name.value()),
        ("Father name", form.father_name.value()),
        ("Phone", form.phone.value()),
        ("Email", form.email.value()),
        ("Street", form.street.value()),
        ("House", form.house.value()),
        ("Entrance", form.entrance.value()),
        ("Apartment", form.apartment.value()),
    ];
    for (label, value) in rows.into_iter().filter(|(_, value)| !value.is_empty()) {
        writeln!(out, "{label:<12} {value}")?;
    }
    writeln!(out, "{:<12} {}", "Delivery", form.delivery_type())?;
    writeln!(out, "{:<12} {}", "Payment", form.payment_type.as_str())?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use lumen_storefront::config::StorefrontConfig;
    use lumen_storefront::error::ClientError;

    use super::*;

    #[tokio::test]
    async fn test_guest_save_is_refused_before_any_request() {
        // Nothing listens on the discard port; a request would fail with a transport error
        let config = StorefrontConfig::for_api("http://127.0.0.1:9/api/").unwrap();
        let ctx = Context::new(config).unwrap();
        let args = ProfileArgs {
            delivery: None,
            contact: ContactArgs {
                email: Some("anna@lumen.shop".to_string()),
                ..ContactArgs::default()
            },
        };

        let result = save(&ctx, args).await;

        assert!(matches!(
            result,
            Err(CliError::Client(ClientError::Unauthenticated))
        ));
    }

    #[test]
    fn test_print_profile_skips_blank_fields() {
        let mut form = ProfileForm::default();
        form.email.set_value("anna@lumen.shop");

        let mut out = Vec::new();
        print_profile(&mut out, &form).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Email        anna@lumen.shop"));
        assert!(!text.contains("Street"));
        assert!(text.contains("Payment      cashToCourier"));
    }

    #[test]
    fn test_payment_flag_marks_form_dirty() {
        let mut form = ProfileForm::default();
        let contact = ContactArgs {
            payment: Some(lumen_core::PaymentType::CardOnline),
            ..ContactArgs::default()
        };

        apply_args(&mut form, contact);

        assert!(form.is_dirty());
    }
}
