use super::money::Money;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressType {
    Billing,
    Shipping,
    BillingAndShipping,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub address_type: AddressType,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

impl Address {
    pub fn new(address_type: AddressType) -> Self {
        Self {
            address_type,
            email: None,
            first_name: None,
            last_name: None,
            line1: None,
            city: None,
            postal_code: None,
            country_code: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// The email, if present and not blank.
    pub fn non_empty_email(&self) -> Option<&str> {
        self.email.as_deref().filter(|email| !email.is_empty())
    }
}

/// Closed set of value types a payment property may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum PropertyValueType {
    ShortText,
    LongText,
    Integer,
    Decimal,
    DateTime,
    Boolean,
}

/// A named, typed entry in a payment's property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationProperty {
    pub name: String,
    pub value_type: PropertyValueType,
    pub value: String,
}

impl OperationProperty {
    pub fn short_text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value_type: PropertyValueType::ShortText,
            value: value.into(),
        }
    }
}

/// An inbound payment attached to an order.
///
/// Created by the host before the gateway is invoked. The gateway only ever
/// touches `outer_id`, `is_approved` and `properties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIn {
    pub id: String,
    /// Processor-assigned session token.
    #[serde(default)]
    pub outer_id: Option<String>,
    pub sum: Money,
    #[serde(default)]
    pub is_approved: bool,
    #[serde(default)]
    pub properties: Vec<OperationProperty>,
}

impl PaymentIn {
    pub fn new(id: impl Into<String>, sum: Money) -> Self {
        Self {
            id: id.into(),
            outer_id: None,
            sum,
            is_approved: false,
            properties: Vec::new(),
        }
    }

    pub fn property(&self, name: &str) -> Option<&OperationProperty> {
        self.properties.iter().find(|p| p.name == name)
    }
}

/// How much of an order a store lookup should hydrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderResponseGroup {
    Default,
    #[default]
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub id: String,
    pub store_id: String,
    /// ISO 4217 currency code, parsed when a checkout request is built.
    pub currency: String,
    #[serde(default)]
    pub addresses: Vec<Address>,
    #[serde(default)]
    pub in_payments: Vec<PaymentIn>,
}

impl CustomerOrder {
    pub fn new(
        id: impl Into<String>,
        store_id: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            store_id: store_id.into(),
            currency: currency.into(),
            addresses: Vec::new(),
            in_payments: Vec::new(),
        }
    }

    /// Email to prefill on the processor's page.
    ///
    /// The billing address wins when one exists; otherwise the first address
    /// is used. Blank emails count as absent.
    pub fn buyer_email(&self) -> Option<&str> {
        self.addresses
            .iter()
            .find(|a| a.address_type == AddressType::Billing)
            .or_else(|| self.addresses.first())
            .and_then(Address::non_empty_email)
    }

    pub fn payment_by_outer_id(&self, outer_id: &str) -> Option<&PaymentIn> {
        self.in_payments
            .iter()
            .find(|p| p.outer_id.as_deref() == Some(outer_id))
    }

    pub fn payment_by_outer_id_mut(&mut self, outer_id: &str) -> Option<&mut PaymentIn> {
        self.in_payments
            .iter_mut()
            .find(|p| p.outer_id.as_deref() == Some(outer_id))
    }
}
