//! Request and response types of the processor's express-checkout API.
//!
//! These mirror the three remote operations the gateway drives:
//! `SetExpressCheckout`, `GetExpressCheckoutDetails` and
//! `DoExpressCheckoutPayment`.

use super::money::BasicAmount;
use crate::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Checkout status reported once the capture went through.
pub const PAYMENT_ACTION_COMPLETED: &str = "PaymentActionCompleted";

/// Structural status of a single API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum AckCode {
    Success,
    SuccessWithWarning,
    Failure,
    FailureWithWarning,
    Warning,
    PartialSuccess,
    CustomCode,
}

impl AckCode {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure | Self::FailureWithWarning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum PaymentAction {
    Sale,
    Authorization,
    Order,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum SolutionType {
    /// Buyer must have (or create) a processor account.
    Mark,
    /// Buyer may pay without a processor account.
    Sole,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiError {
    pub error_code: String,
    pub short_message: String,
    pub long_message: String,
    pub severity_code: String,
}

impl ApiError {
    fn message(&self) -> &str {
        if self.long_message.is_empty() {
            &self.short_message
        } else {
            &self.long_message
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub order_total: BasicAmount,
    pub payment_action: PaymentAction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetExpressCheckoutRequest {
    pub return_url: String,
    pub cancel_url: String,
    /// Seconds the processor waits on the callback, as the API expects it.
    pub callback_timeout: String,
    pub solution_type: SolutionType,
    pub buyer_email: Option<String>,
    pub payment_details: Vec<PaymentDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetExpressCheckoutResponse {
    pub token: String,
    pub ack: AckCode,
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetExpressCheckoutDetailsRequest {
    pub token: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PayerInfo {
    pub payer_id: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetExpressCheckoutDetailsResponse {
    pub token: String,
    pub checkout_status: String,
    pub payer_info: PayerInfo,
    pub payment_details: Vec<PaymentDetails>,
    pub ack: AckCode,
    pub errors: Vec<ApiError>,
}

impl GetExpressCheckoutDetailsResponse {
    pub fn is_completed(&self) -> bool {
        self.checkout_status == PAYMENT_ACTION_COMPLETED
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoExpressCheckoutPaymentRequest {
    pub token: String,
    pub payer_id: String,
    pub payment_details: Vec<PaymentDetails>,
}

impl DoExpressCheckoutPaymentRequest {
    /// Builds the capture request from the session details fetched earlier.
    pub fn from_details(token: &str, details: &GetExpressCheckoutDetailsResponse) -> Self {
        Self {
            token: token.to_string(),
            payer_id: details.payer_info.payer_id.clone(),
            payment_details: details.payment_details.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfoDetails {
    pub transaction_id: String,
    pub payment_status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoExpressCheckoutPaymentResponse {
    pub token: String,
    pub payment_info: Vec<PaymentInfoDetails>,
    pub ack: AckCode,
    pub errors: Vec<ApiError>,
}

/// Common envelope of every API response.
pub trait ApiResponse {
    fn ack(&self) -> AckCode;
    fn errors(&self) -> &[ApiError];
}

macro_rules! impl_api_response {
    ($($ty:ty),* $(,)?) => {
        $(
            impl ApiResponse for $ty {
                fn ack(&self) -> AckCode {
                    self.ack
                }

                fn errors(&self) -> &[ApiError] {
                    &self.errors
                }
            }
        )*
    };
}

impl_api_response!(
    SetExpressCheckoutResponse,
    GetExpressCheckoutDetailsResponse,
    DoExpressCheckoutPaymentResponse,
);

/// Rejects absent responses, failure acks, and responses carrying errors.
pub fn check_response<R: ApiResponse>(response: Option<&R>) -> Result<()> {
    let response =
        response.ok_or_else(|| GatewayError::GatewayRejected("response is null".to_string()))?;

    if response.ack().is_failure() || !response.errors().is_empty() {
        let message = response
            .errors()
            .iter()
            .map(ApiError::message)
            .collect::<Vec<_>>()
            .join("\n");
        let message = if message.is_empty() {
            format!("processor acknowledged with {}", response.ack())
        } else {
            message
        };
        return Err(GatewayError::GatewayRejected(message));
    }

    Ok(())
}
