use super::order::{CustomerOrder, PaymentIn};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum PaymentGatewayType {
    Standard,
    Redirection,
    PreparedForm,
}

/// Outcome of confirming a payment with the processor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PaymentInfo {
    /// The buyer should be sent to `redirect_url`.
    DirectRedirectUrl {
        is_approved: bool,
        redirect_url: String,
    },
}

impl PaymentInfo {
    pub fn is_approved(&self) -> bool {
        match self {
            Self::DirectRedirectUrl { is_approved, .. } => *is_approved,
        }
    }

    pub fn redirect_url(&self) -> &str {
        match self {
            Self::DirectRedirectUrl { redirect_url, .. } => redirect_url,
        }
    }
}

/// Capability contract the host platform expects from a payment gateway.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    fn gateway_code(&self) -> &str;
    fn description(&self) -> &str;
    fn logo_url(&self) -> &str;
    fn gateway_type(&self) -> PaymentGatewayType;

    /// Opens a processor session for `payment` and records how to reach it on
    /// the payment. The order is not persisted.
    async fn create_payment(&self, payment: &mut PaymentIn, order: &CustomerOrder) -> Result<()>;

    /// Confirms the session identified by `payment_id` (the processor token)
    /// on order `order_id`, and persists the resulting approval.
    async fn get_payment(&self, payment_id: &str, order_id: &str) -> Result<PaymentInfo>;
}

pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
