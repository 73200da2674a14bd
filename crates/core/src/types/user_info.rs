//! Persisted customer profile.

use serde::{Deserialize, Serialize};

use super::{DeliveryType, PaymentType};

/// Profile returned by `GET users`.
///
/// Every field is optional: a fresh account has nothing saved yet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub delivery_type: Option<DeliveryType>,
    #[serde(default)]
    pub payment_type: Option<PaymentType>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub father_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub house: Option<String>,
    #[serde(default)]
    pub entrance: Option<String>,
    #[serde(default)]
    pub apartment: Option<String>,
}

/// Body of `POST users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoPayload {
    pub delivery_type: DeliveryType,
    pub payment_type: PaymentType,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entrance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apartment: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_profile_deserializes() {
        let info: UserInfo =
            serde_json::from_str(r#"{"email":"anna@lumen.shop","deliveryType":"self"}"#).unwrap();
        assert_eq!(info.email.as_deref(), Some("anna@lumen.shop"));
        assert_eq!(info.delivery_type, Some(DeliveryType::Pickup));
        assert_eq!(info.first_name, None);
    }

    #[test]
    fn test_payload_always_carries_required_keys() {
        let payload = UserInfoPayload {
            delivery_type: DeliveryType::Delivery,
            payment_type: PaymentType::CashToCourier,
            email: String::new(),
            first_name: None,
            last_name: None,
            father_name: None,
            phone: Some("+7999".to_string()),
            street: None,
            house: None,
            entrance: None,
            apartment: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(object["email"], "");
        assert_eq!(object["phone"], "+7999");
    }
}
