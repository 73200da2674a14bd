//! Checkout: the order form and its controller.
//!
//! # Delivery type
//!
//! The form starts in [`DeliveryType::Delivery`] with street and house
//! required. Switching to pickup drops those requirements and blanks all four
//! address fields; switching back makes street and house required again but
//! does not restore what was typed before.

use std::sync::Arc;

use lumen_core::{CartTotals, DeliveryType, Order, OrderPayload, PaymentType, UserInfo};

use super::cart::CartViewModel;
use super::profile::prefill_order_form;
use crate::api::Backend;
use crate::error::{ClientError, Result, add_breadcrumb};
use crate::form::{Field, FieldError, ValidationErrors};
use crate::session::AuthState;
use crate::ui::{Route, Ui, notices};

/// Checkout form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderForm {
    pub first_name: Field,
    pub last_name: Field,
    pub father_name: Field,
    pub phone: Field,
    pub email: Field,
    pub street: Field,
    pub house: Field,
    pub entrance: Field,
    pub apartment: Field,
    pub comment: Field,
    payment_type: Option<PaymentType>,
    delivery_type: DeliveryType,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderForm {
    #[must_use]
    pub fn new() -> Self {
        let mut form = Self {
            first_name: Field::required(),
            last_name: Field::required(),
            father_name: Field::optional(),
            phone: Field::required(),
            email: Field::required().with_email(),
            street: Field::optional(),
            house: Field::optional(),
            entrance: Field::optional(),
            apartment: Field::optional(),
            comment: Field::optional(),
            payment_type: Some(PaymentType::default()),
            delivery_type: DeliveryType::Delivery,
        };
        form.apply_delivery_rules();
        form
    }

    #[must_use]
    pub const fn delivery_type(&self) -> DeliveryType {
        self.delivery_type
    }

    pub fn set_delivery_type(&mut self, delivery_type: DeliveryType) {
        self.delivery_type = delivery_type;
        self.apply_delivery_rules();
    }

    fn apply_delivery_rules(&mut self) {
        let requires_address = self.delivery_type.requires_address();
        self.street.set_required(requires_address);
        self.house.set_required(requires_address);

        if !requires_address {
            self.street.clear();
            self.house.clear();
            self.entrance.clear();
            self.apartment.clear();
        }
    }

    #[must_use]
    pub const fn payment_type(&self) -> Option<PaymentType> {
        self.payment_type
    }

    pub const fn set_payment_type(&mut self, payment_type: Option<PaymentType>) {
        self.payment_type = payment_type;
    }

    fn fields(&self) -> [(&'static str, &Field); 10] {
        [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("father_name", &self.father_name),
            ("phone", &self.phone),
            ("email", &self.email),
            ("street", &self.street),
            ("house", &self.house),
            ("entrance", &self.entrance),
            ("apartment", &self.apartment),
            ("comment", &self.comment),
        ]
    }

    /// Show every field's error, as on a failed submit.
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
            &mut self.comment,
        ] {
            field.touch();
        }
    }

    /// Every current failure, touched or not.
    #[must_use]
    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for (name, field) in self.fields() {
            errors.check(name, field);
        }
        if self.payment_type.is_none() {
            errors.push("payment_type", FieldError::Required);
        }
        errors
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Build the order payload.
    ///
    /// Blank optional fields are left out. Address fields are only sent for
    /// delivery orders.
    ///
    /// # Errors
    ///
    /// Returns every failing field when the form is invalid.
    pub fn validate(&self) -> std::result::Result<OrderPayload, ValidationErrors> {
        self.errors().into_result()?;

        let Some(payment_type) = self.payment_type else {
            let mut errors = ValidationErrors::default();
            errors.push("payment_type", FieldError::Required);
            return Err(errors);
        };

        let address = |field: &Field| {
            if self.delivery_type.requires_address() {
                field.non_empty()
            } else {
                None
            }
        };

        Ok(OrderPayload {
            delivery_type: self.delivery_type,
            first_name: self.first_name.value().to_string(),
            last_name: self.last_name.value().to_string(),
            father_name: self.father_name.non_empty(),
            phone: self.phone.value().to_string(),
            payment_type,
            email: self.email.value().to_string(),
            street: address(&self.street),
            house: address(&self.house),
            entrance: address(&self.entrance),
            apartment: address(&self.apartment),
            comment: self.comment.non_empty(),
        })
    }

    /// Overwrite the form with a saved profile.
    ///
    /// Every field takes the profile's value; fields the profile lacks become
    /// empty. The profile's delivery type is applied last, so a pickup
    /// profile leaves the address blank.
    pub fn apply_profile(&mut self, info: &UserInfo) {
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
        self.payment_type = Some(info.payment_type.unwrap_or_default());

        if let Some(delivery_type) = info.delivery_type {
            self.set_delivery_type(delivery_type);
        }
    }
}

/// Outcome of [`OrderController::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutEntry {
    /// The cart has lines; checkout can proceed.
    Ready(CartTotals),
    /// The cart is empty; the user was sent home.
    CartEmpty,
}

/// Drives the checkout view.
pub struct OrderController<B> {
    backend: B,
    cart: Arc<CartViewModel<B>>,
    auth: AuthState,
    ui: Ui,
    form: OrderForm,
    totals: CartTotals,
}

impl<B: Backend> OrderController<B> {
    #[must_use]
    pub fn new(backend: B, cart: Arc<CartViewModel<B>>, auth: AuthState, ui: Ui) -> Self {
        Self {
            backend,
            cart,
            auth,
            ui,
            form: OrderForm::new(),
            totals: CartTotals::default(),
        }
    }

    /// Load the cart and, for signed-in customers, prefill the form.
    ///
    /// # Errors
    ///
    /// Returns the cart error. A failed profile lookup only logs a warning;
    /// the form stays as it was.
    #[tracing::instrument(skip(self))]
    pub async fn enter(&mut self) -> Result<CheckoutEntry> {
        let cart = self.cart.load().await?;
        if cart.is_empty() {
            self.ui.notify(notices::CART_EMPTY);
            self.ui.navigate(&Route::Home);
            return Ok(CheckoutEntry::CartEmpty);
        }

        self.totals = cart.totals();

        if let Err(err) = prefill_order_form(&self.backend, &self.auth, &mut self.form).await {
            tracing::warn!(error = %err, "Could not prefill order form from profile");
        }

        Ok(CheckoutEntry::Ready(self.totals))
    }

    #[must_use]
    pub const fn form(&self) -> &OrderForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut OrderForm {
        &mut self.form
    }

    #[must_use]
    pub const fn totals(&self) -> CartTotals {
        self.totals
    }

    pub fn change_delivery_type(&mut self, delivery_type: DeliveryType) {
        self.form.set_delivery_type(delivery_type);
    }

    /// Validate and submit the order.
    ///
    /// On success the confirmation dialog opens and the cart badge drops to 0.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Validation`] if the form is invalid; every field is
    ///   marked touched and nothing is sent
    /// - the backend error otherwise, after showing it as a notice
    #[tracing::instrument(skip(self), fields(delivery_type = %self.form.delivery_type))]
    pub async fn create_order(&mut self) -> Result<Order> {
        add_breadcrumb(
            "checkout",
            "Place order",
            Some(&[("delivery_type", self.form.delivery_type.as_str())]),
        );

        let payload = match self.form.validate() {
            Ok(payload) => payload,
            Err(errors) => {
                self.form.mark_all_as_touched();
                self.ui.notify(notices::FILL_REQUIRED_FIELDS);
                tracing::debug!(fields = %errors, "Order form invalid");
                return Err(ClientError::Validation(errors));
            }
        };

        match self.backend.create_order(&payload).await {
            Ok(order) => {
                tracing::info!(order_id = ?order.id, "Order placed");
                self.ui.dialogs().open_order_confirmation();
                self.cart.set_count(0);
                Ok(order)
            }
            Err(err) => {
                self.ui.notify_error(&err, notices::ORDER_FAILED);
                Err(err)
            }
        }
    }

    /// Close the confirmation dialog and go home.
    pub fn dismiss_confirmation(&self) {
        self.ui.dialogs().close_order_confirmation();
        self.ui.navigate(&Route::Home);
    }
}
