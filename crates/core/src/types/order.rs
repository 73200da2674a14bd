//! Order submission payload and the backend's acknowledgement.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use super::{DeliveryType, OrderId, OrderStatus, PaymentType};

/// Body of `POST orders`.
///
/// Optional fields are omitted from the JSON entirely when `None`; the
/// backend treats a present-but-empty string as a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    pub delivery_type: DeliveryType,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    pub phone: String,
    pub payment_type: PaymentType,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl OrderPayload {
    /// Whether any address sub-field is present.
    #[must_use]
    pub const fn has_address(&self) -> bool {
        self.street.is_some()
            || self.house.is_some()
            || self.entrance.is_some()
            || self.apartment.is_some()
    }
}

/// What the backend sends back for `POST orders`.
///
/// Every field is optional and unreadable values are dropped, so any
/// reply without an error flag counts as an accepted order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAcknowledgement {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<OrderId>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<OrderStatus>,
    #[serde(default, deserialize_with = "lenient")]
    pub total_amount: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient")]
    pub created_at: Option<DateTime<Utc>>,
}

impl OrderAcknowledgement {
    /// Read an acknowledgement from a decoded body. Bodies that are not
    /// objects carry nothing and yield an empty acknowledgement.
    #[must_use]
    pub fn from_value(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or_default()
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// A placed order: the submitted payload plus what the backend reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    #[serde(flatten)]
    pub details: OrderPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    #[must_use]
    pub fn new(details: OrderPayload, acknowledgement: OrderAcknowledgement) -> Self {
        Self {
            id: acknowledgement.id,
            details,
            status: acknowledgement.status,
            total_amount: acknowledgement.total_amount,
            created_at: acknowledgement.created_at,
        }
    }
}
