//! Delivery, payment and order status enums.
//!
//! Wire values follow the backend's camelCase vocabulary; pickup travels as
//! `"self"`.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known enum variant.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    /// Which enum was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

/// How an order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeliveryType {
    /// Courier delivery to a street address.
    #[default]
    #[serde(rename = "delivery")]
    Delivery,
    /// Customer collects the order from the shop.
    #[serde(rename = "self")]
    Pickup,
}

impl DeliveryType {
    /// Wire value of this delivery type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Delivery => "delivery",
            Self::Pickup => "self",
        }
    }

    /// Whether this delivery type needs a street address.
    #[must_use]
    pub const fn requires_address(&self) -> bool {
        matches!(self, Self::Delivery)
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delivery" => Ok(Self::Delivery),
            "self" | "pickup" => Ok(Self::Pickup),
            other => Err(UnknownVariant {
                kind: "delivery type",
                value: other.to_owned(),
            }),
        }
    }
}

/// How the customer pays for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PaymentType {
    /// Card payment on the website.
    CardOnline,
    /// Card payment to the courier on delivery.
    CardToCourier,
    /// Cash payment to the courier on delivery.
    #[default]
    CashToCourier,
}

impl PaymentType {
    /// Every payment type, in display order.
    pub const ALL: [Self; 3] = [Self::CardOnline, Self::CardToCourier, Self::CashToCourier];

    /// Wire value of this payment type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CardOnline => "cardOnline",
            Self::CardToCourier => "cardToCourier",
            Self::CashToCourier => "cashToCourier",
        }
    }
}

impl fmt::Display for PaymentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cardOnline" | "card-online" => Ok(Self::CardOnline),
            "cardToCourier" | "card-to-courier" => Ok(Self::CardToCourier),
            "cashToCourier" | "cash-to-courier" => Ok(Self::CashToCourier),
            other => Err(UnknownVariant {
                kind: "payment type",
                value: other.to_owned(),
            }),
        }
    }
}

/// Order processing status reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    New,
    Pending,
    Delivery,
    Cancelled,
    Success,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Pending => write!(f, "pending"),
            Self::Delivery => write!(f, "delivery"),
            Self::Cancelled => write!(f, "cancelled"),
            Self::Success => write!(f, "success"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_pickup_serializes_as_self() {
        assert_eq!(
            serde_json::to_string(&DeliveryType::Pickup).unwrap(),
            "\"self\""
        );
        let parsed: DeliveryType = serde_json::from_str("\"delivery\"").unwrap();
        assert_eq!(parsed, DeliveryType::Delivery);
    }

    #[test]
    fn test_payment_type_wire_values() {
        for payment in PaymentType::ALL {
            let json = serde_json::to_string(&payment).unwrap();
            assert_eq!(json, format!("\"{}\"", payment.as_str()));
        }
    }

    #[test]
    fn test_from_str_accepts_cli_spelling() {
        assert_eq!(
            "cash-to-courier".parse::<PaymentType>().unwrap(),
            PaymentType::CashToCourier
        );
        assert_eq!("pickup".parse::<DeliveryType>().unwrap(), DeliveryType::Pickup);
        let err = "teleport".parse::<DeliveryType>().unwrap_err();
        assert_eq!(err.to_string(), "unknown delivery type 'teleport'");
    }

    #[test]
    fn test_requires_address() {
        assert!(DeliveryType::Delivery.requires_address());
        assert!(!DeliveryType::Pickup.requires_address());
    }
}
