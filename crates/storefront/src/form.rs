//! Form field state and validation.
//!
//! A [`Field`] holds a text value, the validators currently attached to it,
//! and whether the user has interacted with it. Errors are always computed
//! from the current value; [`Field::visible_error`] hides them until the
//! field is touched so untouched inputs are not flagged on first render.

use core::fmt;

use lumen_core::{Email, EmailError};

/// A single validation failure on a field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// The field is required and empty.
    #[error("this field is required")]
    Required,
    /// The field must hold an email address.
    #[error("invalid email: {0}")]
    InvalidEmail(EmailError),
}

/// A text input with its validators and interaction state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Field {
    value: String,
    required: bool,
    email: bool,
    touched: bool,
}

impl Field {
    /// An optional, empty field.
    #[must_use]
    pub fn optional() -> Self {
        Self::default()
    }

    /// A required, empty field.
    #[must_use]
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }

    /// Attach the email-format validator.
    #[must_use]
    pub fn with_email(mut self) -> Self {
        self.email = true;
        self
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    pub fn set_required(&mut self, required: bool) {
        self.required = required;
    }

    #[must_use]
    pub const fn is_touched(&self) -> bool {
        self.touched
    }

    pub fn touch(&mut self) {
        self.touched = true;
    }

    /// First failing validator, regardless of touched state.
    #[must_use]
    pub fn error(&self) -> Option<FieldError> {
        if self.value.is_empty() {
            // Format validators only judge non-empty input.
            return self.required.then_some(FieldError::Required);
        }
        if self.email {
            return Email::parse(&self.value).err().map(FieldError::InvalidEmail);
        }
        None
    }

    /// The error to display next to the input, once the user has touched it.
    #[must_use]
    pub fn visible_error(&self) -> Option<FieldError> {
        if self.touched { self.error() } else { None }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error().is_none()
    }

    /// The value if non-empty.
    ///
    /// Payload builders use this so that blank optional inputs are omitted
    /// rather than sent as empty strings.
    #[must_use]
    pub fn non_empty(&self) -> Option<String> {
        (!self.value.is_empty()).then(|| self.value.clone())
    }
}

/// All field failures of one form submission attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(&'static str, FieldError)>,
}

impl ValidationErrors {
    /// Record the failure of `field` if it has one.
    pub fn check(&mut self, name: &'static str, field: &Field) {
        if let Some(error) = field.error() {
            self.errors.push((name, error));
        }
    }

    /// Record a failure that is not tied to a text field.
    pub fn push(&mut self, name: &'static str, error: FieldError) {
        self.errors.push((name, error));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The failure recorded for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldError> {
        self.errors
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, error)| error)
    }

    /// Names of the failing fields, in form order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.iter().map(|(field, _)| *field)
    }

    /// `Ok(())` when nothing failed, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns the collected errors when at least one field failed.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, error)| format!("{field}: {error}"))
            .collect();
        f.write_str(&parts.join("; "))
    }
}
