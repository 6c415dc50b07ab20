//! Customer details collected at checkout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the customer receives the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryOption {
    /// Collect at the counter.
    Pickup,
    /// Deliver to the customer's address.
    Delivery,
}

impl DeliveryOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryOption::Pickup => "pickup",
            DeliveryOption::Delivery => "delivery",
        }
    }

    /// Whether an address is required.
    pub fn needs_address(&self) -> bool {
        matches!(self, DeliveryOption::Delivery)
    }
}

impl fmt::Display for DeliveryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryOption {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pickup" => Ok(DeliveryOption::Pickup),
            "delivery" => Ok(DeliveryOption::Delivery),
            other => Err(format!("unknown delivery option: {other}")),
        }
    }
}

/// Raw checkout form input, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutFields {
    pub name: String,
    pub phone: String,
    pub address: String,
    /// `None` until the customer picks one.
    pub delivery_option: Option<DeliveryOption>,
    pub notes: String,
}

impl CheckoutFields {
    /// Copy with surrounding whitespace removed from every text field.
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            delivery_option: self.delivery_option,
            notes: self.notes.trim().to_string(),
        }
    }
}

/// Customer details as recorded on an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,
    pub phone: String,
    /// Empty for pickup orders.
    pub address: String,
    pub delivery_option: DeliveryOption,
    #[serde(default)]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_option_parse() {
        assert_eq!("Pickup".parse::<DeliveryOption>(), Ok(DeliveryOption::Pickup));
        assert_eq!(" delivery ".parse::<DeliveryOption>(), Ok(DeliveryOption::Delivery));
        assert!("drone".parse::<DeliveryOption>().is_err());
    }

    #[test]
    fn test_trimmed() {
        let fields = CheckoutFields {
            name: "  Asha ".into(),
            phone: "\t98450 12345\n".into(),
            address: " ".into(),
            delivery_option: Some(DeliveryOption::Pickup),
            notes: " extra hot ".into(),
        };
        let t = fields.trimmed();
        assert_eq!(t.name, "Asha");
        assert_eq!(t.phone, "98450 12345");
        assert_eq!(t.address, "");
        assert_eq!(t.notes, "extra hot");
    }

    #[test]
    fn test_customer_json_shape() {
        let customer = Customer {
            name: "Asha".into(),
            phone: "98450".into(),
            address: String::new(),
            delivery_option: DeliveryOption::Pickup,
            notes: String::new(),
        };
        let json = serde_json::to_value(&customer).unwrap();
        assert_eq!(json["deliveryOption"], "pickup");
    }
}
