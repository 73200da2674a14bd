//! Saved customer profile.
//!
//! The profile is a convenience for checkout: it only ever prefills the
//! order form, and it is only looked up for signed-in customers.

use lumen_core::{DeliveryType, PaymentType, UserInfo, UserInfoPayload};

use super::order::OrderForm;
use crate::api::Backend;
use crate::error::{ClientError, Result, add_breadcrumb};
use crate::form::{Field, ValidationErrors};
use crate::session::AuthState;
use crate::ui::{Ui, notices};

/// Fill `form` from the saved profile of a signed-in customer.
///
/// Returns `Ok(false)` without contacting the backend for guests.
///
/// # Errors
///
/// Returns the backend error; `form` is left untouched.
pub async fn prefill_order_form<B: Backend>(
    backend: &B,
    auth: &AuthState,
    form: &mut OrderForm,
) -> Result<bool> {
    if !auth.is_authenticated() {
        return Ok(false);
    }

    let info = backend.get_user_info().await?;
    form.apply_profile(&info);
    tracing::debug!("Order form prefilled from profile");
    Ok(true)
}

/// Profile editing form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileForm {
    pub first_name: Field,
    pub last_name: Field,
    pub father_name: Field,
    pub phone: Field,
    pub email: Field,
    pub street: Field,
    pub house: Field,
    pub entrance: Field,
    pub apartment: Field,
    pub payment_type: PaymentType,
    delivery_type: DeliveryType,
    dirty: bool,
}

impl Default for ProfileForm {
    fn default() -> Self {
        Self {
            first_name: Field::optional(),
            last_name: Field::optional(),
            father_name: Field::optional(),
            phone: Field::optional(),
            email: Field::required(),
            street: Field::optional(),
            house: Field::optional(),
            entrance: Field::optional(),
            apartment: Field::optional(),
            payment_type: PaymentType::default(),
            delivery_type: DeliveryType::Delivery,
            dirty: false,
        }
    }
}

impl ProfileForm {
    #[must_use]
    pub const fn delivery_type(&self) -> DeliveryType {
        self.delivery_type
    }

    /// Whether the form was changed since it was loaded or last saved.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub const fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Overwrite every field with `info`; missing values become empty.
    pub fn apply(&mut self, info: &UserInfo) {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        self.first_name.set_value(text(&info.first_name));
        self.last_name.set_value(text(&info.last_name));
        self.father_name.set_value(text(&info.father_name));
        self.phone.set_value(text(&info.phone));
        self.email.set_value(text(&info.email));
        self.street.set_value(text(&info.street));
        self.house.set_value(text(&info.house));
        self.entrance.set_value(text(&info.entrance));
        self.apartment.set_value(text(&info.apartment));
        self.payment_type = info.payment_type.unwrap_or_default();
        if let Some(delivery_type) = info.delivery_type {
            self.delivery_type = delivery_type;
        }
        self.dirty = false;
    }

    pub fn mark_all_as_touched(&mut self) {
        for field in [
            &mut self.first_name,
            &mut self.last_name,
            &mut self.father_name,
            &mut self.phone,
            &mut self.email,
            &mut self.street,
            &mut self.house,
            &mut self.entrance,
            &mut self.apartment,
        ] {
            field.touch();
        }
    }

    /// Build the save payload; blank fields other than email are left out.
    ///
    /// # Errors
    ///
    /// Returns the failing fields when the email is missing.
    pub fn validate(&self) -> std::result::Result<UserInfoPayload, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        errors.check("email", &self.email);
        errors.into_result()?;

        Ok(UserInfoPayload {
            delivery_type: self.delivery_type,
            payment_type: self.payment_type,
            email: self.email.value().to_string(),
            first_name: self.first_name.non_empty(),
            last_name: self.last_name.non_empty(),
            father_name: self.father_name.non_empty(),
            phone: self.phone.non_empty(),
            street: self.street.non_empty(),
            house: self.house.non_empty(),
            entrance: self.entrance.non_empty(),
            apartment: self.apartment.non_empty(),
        })
    }
}

/// Drives the profile view.
pub struct ProfileController<B> {
    backend: B,
    auth: AuthState,
    ui: Ui,
    form: ProfileForm,
}

impl<B: Backend> ProfileController<B> {
    #[must_use]
    pub fn new(backend: B, auth: AuthState, ui: Ui) -> Self {
        Self {
            backend,
            auth,
            ui,
            form: ProfileForm::default(),
        }
    }

    #[must_use]
    pub const fn form(&self) -> &ProfileForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut ProfileForm {
        &mut self.form
    }

    /// Fill the form from the saved profile.
    ///
    /// Returns `Ok(false)` for guests, who have no profile.
    ///
    /// # Errors
    ///
    /// Returns the backend error after showing it as a notice.
    #[tracing::instrument(skip(self))]
    pub async fn load(&mut self) -> Result<bool> {
        if !self.auth.is_authenticated() {
            tracing::debug!("Guest session, no profile to load");
            return Ok(false);
        }

        match self.backend.get_user_info().await {
            Ok(info) => {
                self.form.apply(&info);
                Ok(true)
            }
            Err(err) => {
                self.ui.notify_error(&err, notices::PROFILE_LOAD_FAILED);
                Err(err)
            }
        }
    }

    pub const fn change_delivery_type(&mut self, delivery_type: DeliveryType) {
        self.form.delivery_type = delivery_type;
        self.form.dirty = true;
    }

    /// Validate and save the form.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] if the email is missing; fields are
    ///   marked touched and nothing is sent
    /// - the backend error otherwise, after showing it as a notice
    #[tracing::instrument(skip(self))]
    pub async fn save(&mut self) -> Result<()> {
        add_breadcrumb("profile", "Save profile", None);

        let payload = match self.form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.form.mark_all_as_touched();
                return Err(ClientError::Validation(errors));
            }
        };

        match self.backend.update_user_info(&payload).await {
            Ok(_) => {
                self.form.dirty = false;
                self.ui.notify(notices::PROFILE_SAVED);
                Ok(())
            }
            Err(err) => {
                self.ui.notify_error(&err, notices::PROFILE_SAVE_FAILED);
                Err(err)
            }
        }
    }
}
