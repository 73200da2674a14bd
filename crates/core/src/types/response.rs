//! Response envelopes shared by every backend endpoint.

use serde::{Deserialize, Serialize};

/// The backend's generic response body.
///
/// Failures always carry `error: true`. Endpoints without a payload (removing
/// a favorite, saving the profile) answer with `error: false` on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: bool,
    /// Human-readable message. Older backend builds spell the key `massage`.
    #[serde(default, alias = "massage")]
    pub message: String,
}

impl ErrorResponse {
    /// Inspect an arbitrary JSON body for the error discriminant.
    ///
    /// Returns `Some` only for objects carrying a boolean `error` key, so
    /// payload types (carts, product lists) never match.
    #[must_use]
    pub fn from_value(value: &serde_json::Value) -> Option<Self> {
        let object = value.as_object()?;
        let error = object.get("error")?.as_bool()?;
        let message = object
            .get("message")
            .or_else(|| object.get("massage"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_owned();
        Some(Self { error, message })
    }
}

/// Body of `GET cart/count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CartCount {
    pub count: u32,
}
