//! Unified error handling with Sentry integration.
//!
//! Every view-model operation returns `Result<T, ClientError>`. Failures fall
//! into three families:
//! - domain errors: the backend answered with an `{ error: true }` envelope
//! - transport errors: the request failed or the backend answered non-2xx
//! - validation errors: a form was invalid and nothing was sent

use thiserror::Error;

use crate::form::ValidationErrors;

/// Error type for storefront client operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend rejected the request with an error envelope.
    #[error("{0}")]
    Domain(String),

    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}{}", format_status_message(.message.as_deref()))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` field of the error body, when there was one.
        message: Option<String>,
    },

    /// An endpoint URL could not be built from the configured base.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A form failed local validation; nothing was sent.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// The action needs a signed-in customer.
    #[error("Not signed in")]
    Unauthenticated,
}

impl ClientError {
    /// Message suitable for a user-facing notice.
    ///
    /// Uses the backend's own message when one was provided and falls back to
    /// `fallback` otherwise.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Domain(message) if !message.is_empty() => message.clone(),
            Self::Status {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Whether this is a transport-level failure worth reporting.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Parse(_))
            || matches!(self, Self::Status { status, .. } if *status >= 500)
    }

    /// Capture transport failures to Sentry and log them.
    ///
    /// Domain and validation errors are expected outcomes of user input and
    /// are only logged at debug level.
    pub fn report(&self) {
        if self.is_transport() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Backend request failed"
            );
        } else {
            tracing::debug!(error = %self, "Action rejected");
        }
    }
}

fn format_status_message(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

/// Result type alias for `ClientError`.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Set quantity", Some(&[("product_id", "p1"), ("quantity", "2")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_display() {
        let err = ClientError::Domain("Товар не найден".to_string());
        assert_eq!(err.to_string(), "Товар не найден");

        let err = ClientError::Status {
            status: 502,
            message: None,
        };
        assert_eq!(err.to_string(), "HTTP 502");

        let err = ClientError::Status {
            status: 400,
            message: Some("bad phone".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 400: bad phone");
    }

    #[test]
    fn test_user_message_prefers_backend_text() {
        let err = ClientError::Domain("Нет в наличии".to_string());
        assert_eq!(err.user_message("fallback"), "Нет в наличии");

        let err = ClientError::Status {
            status: 400,
            message: Some("Неверный телефон".to_string()),
        };
        assert_eq!(err.user_message("fallback"), "Неверный телефон");
    }

    #[test]
    fn test_user_message_falls_back() {
        assert_eq!(
            ClientError::Domain(String::new()).user_message("Ошибка"),
            "Ошибка"
        );
        assert_eq!(
            ClientError::Status {
                status: 500,
                message: None
            }
            .user_message("Ошибка"),
            "Ошибка"
        );
        assert_eq!(ClientError::Unauthenticated.user_message("Ошибка"), "Ошибка");
    }

    #[test]
    fn test_transport_classification() {
        assert!(
            ClientError::Status {
                status: 503,
                message: None
            }
            .is_transport()
        );
        assert!(
            !ClientError::Status {
                status: 404,
                message: None
            }
            .is_transport()
        );
        assert!(!ClientError::Domain("x".to_string()).is_transport());
    }
}
