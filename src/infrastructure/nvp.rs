//! HTTP client for the processor's Name-Value-Pair (NVP) API.
//!
//! Every call is a form-encoded POST carrying the method name, the API
//! version and the merchant credentials; the response body is form-encoded
//! as well. Repeated groups are flattened with numeric suffixes
//! (`PAYMENTREQUEST_0_AMT`, `L_LONGMESSAGE0`, ...).

use crate::domain::express_checkout::{
    AckCode, ApiError, DoExpressCheckoutPaymentRequest, DoExpressCheckoutPaymentResponse,
    GetExpressCheckoutDetailsRequest, GetExpressCheckoutDetailsResponse, PayerInfo,
    PaymentAction, PaymentDetails, PaymentInfoDetails, SetExpressCheckoutRequest,
    SetExpressCheckoutResponse,
};
use crate::domain::money::{BasicAmount, CurrencyCode};
use crate::domain::ports::ExpressCheckoutApi;
use crate::domain::store::{Environment, GatewayConfig};
use crate::error::BoxError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const SANDBOX_ENDPOINT: &str = "https://api-3t.sandbox.paypal.com/nvp";
pub const LIVE_ENDPOINT: &str = "https://api-3t.paypal.com/nvp";
pub const DEFAULT_API_VERSION: &str = "124.0";

type Fields = Vec<(String, String)>;

#[derive(Error, Debug)]
pub enum NvpError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed NVP response: {0}")]
    Decode(String),
}

/// Transport settings for [`NvpClient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NvpClientConfig {
    pub sandbox_endpoint: String,
    pub live_endpoint: String,
    pub api_version: String,
    pub timeout_secs: u64,
}

impl Default for NvpClientConfig {
    fn default() -> Self {
        Self {
            sandbox_endpoint: SANDBOX_ENDPOINT.to_string(),
            live_endpoint: LIVE_ENDPOINT.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: 30,
        }
    }
}

impl NvpClientConfig {
    /// Sends every call to `endpoint`, whatever the store's mode.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        self.sandbox_endpoint = endpoint.clone();
        self.live_endpoint = endpoint;
        self
    }

    pub fn endpoint(&self, environment: Environment) -> &str {
        match environment {
            Environment::Sandbox => &self.sandbox_endpoint,
            Environment::Live => &self.live_endpoint,
        }
    }
}

/// `ExpressCheckoutApi` over the NVP HTTP protocol.
#[derive(Clone)]
pub struct NvpClient {
    http: reqwest::Client,
    config: NvpClientConfig,
}

impl NvpClient {
    pub fn new(config: NvpClientConfig) -> Result<Self, NvpError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self { http, config })
    }

    async fn call(
        &self,
        method: &str,
        fields: Fields,
        gateway: &GatewayConfig,
    ) -> Result<NvpResponse, NvpError> {
        let endpoint = self.config.endpoint(gateway.environment());
        let mut form = credentials(method, &self.config.api_version, gateway);
        form.extend(fields);

        debug!(method, endpoint, "calling NVP API");
        let response = self.http.post(endpoint).form(&form).send().await?;
        let status = response.status();
        debug!(method, %status, "NVP API responded");
        if !status.is_success() {
            return Err(NvpError::Status(status));
        }

        let body = response.text().await?;
        NvpResponse::parse(&body)
    }
}

#[async_trait]
impl ExpressCheckoutApi for NvpClient {
    async fn set_express_checkout(
        &self,
        request: &SetExpressCheckoutRequest,
        config: &GatewayConfig,
    ) -> Result<SetExpressCheckoutResponse, BoxError> {
        let response = self
            .call("SetExpressCheckout", encode_set_express_checkout(request), config)
            .await?;
        Ok(SetExpressCheckoutResponse {
            token: response.get_or_empty("TOKEN"),
            ack: response.ack()?,
            errors: response.errors(),
        })
    }

    async fn get_express_checkout_details(
        &self,
        request: &GetExpressCheckoutDetailsRequest,
        config: &GatewayConfig,
    ) -> Result<GetExpressCheckoutDetailsResponse, BoxError> {
        let fields = vec![("TOKEN".to_string(), request.token.clone())];
        let response = self
            .call("GetExpressCheckoutDetails", fields, config)
            .await?;
        Ok(decode_checkout_details(&response)?)
    }

    async fn do_express_checkout_payment(
        &self,
        request: &DoExpressCheckoutPaymentRequest,
        config: &GatewayConfig,
    ) -> Result<DoExpressCheckoutPaymentResponse, BoxError> {
        let response = self
            .call(
                "DoExpressCheckoutPayment",
                encode_do_express_checkout_payment(request),
                config,
            )
            .await?;

        let payment_info = (0..)
            .map_while(|i| {
                let transaction_id = response.get(&format!("PAYMENTINFO_{i}_TRANSACTIONID"))?;
                Some(PaymentInfoDetails {
                    transaction_id: transaction_id.to_string(),
                    payment_status: response.get_or_empty(&format!("PAYMENTINFO_{i}_PAYMENTSTATUS")),
                })
            })
            .collect();

        Ok(DoExpressCheckoutPaymentResponse {
            token: response.get_or_empty("TOKEN"),
            payment_info,
            ack: response.ack()?,
            errors: response.errors(),
        })
    }
}

fn credentials(method: &str, version: &str, gateway: &GatewayConfig) -> Fields {
    vec![
        ("METHOD".to_string(), method.to_string()),
        ("VERSION".to_string(), version.to_string()),
        ("USER".to_string(), gateway.username().to_string()),
        ("PWD".to_string(), gateway.password().to_string()),
        ("SIGNATURE".to_string(), gateway.signature().to_string()),
    ]
}

fn encode_payment_details(details: &[PaymentDetails], fields: &mut Fields) {
    for (i, detail) in details.iter().enumerate() {
        fields.push((
            format!("PAYMENTREQUEST_{i}_AMT"),
            detail.order_total.value.clone(),
        ));
        fields.push((
            format!("PAYMENTREQUEST_{i}_CURRENCYCODE"),
            detail.order_total.currency.to_string(),
        ));
        fields.push((
            format!("PAYMENTREQUEST_{i}_PAYMENTACTION"),
            detail.payment_action.to_string(),
        ));
    }
}

fn encode_set_express_checkout(request: &SetExpressCheckoutRequest) -> Fields {
    let mut fields = vec![
        ("RETURNURL".to_string(), request.return_url.clone()),
        ("CANCELURL".to_string(), request.cancel_url.clone()),
        ("CALLBACKTIMEOUT".to_string(), request.callback_timeout.clone()),
        ("SOLUTIONTYPE".to_string(), request.solution_type.to_string()),
    ];
    if let Some(email) = &request.buyer_email {
        fields.push(("EMAIL".to_string(), email.clone()));
    }
    encode_payment_details(&request.payment_details, &mut fields);
    fields
}

fn encode_do_express_checkout_payment(request: &DoExpressCheckoutPaymentRequest) -> Fields {
    let mut fields = vec![
        ("TOKEN".to_string(), request.token.clone()),
        ("PAYERID".to_string(), request.payer_id.clone()),
    ];
    encode_payment_details(&request.payment_details, &mut fields);
    fields
}

fn decode_checkout_details(
    response: &NvpResponse,
) -> Result<GetExpressCheckoutDetailsResponse, NvpError> {
    Ok(GetExpressCheckoutDetailsResponse {
        token: response.get_or_empty("TOKEN"),
        checkout_status: response.get_or_empty("CHECKOUTSTATUS"),
        payer_info: PayerInfo {
            payer_id: response.get_or_empty("PAYERID"),
            email: response.get("EMAIL").map(str::to_string),
        },
        payment_details: response.payment_details()?,
        ack: response.ack()?,
        errors: response.errors(),
    })
}

/// Decoded NVP response body.
#[derive(Debug, Clone, PartialEq)]
struct NvpResponse {
    values: HashMap<String, String>,
}

impl NvpResponse {
    fn parse(body: &str) -> Result<Self, NvpError> {
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(body).map_err(|e| NvpError::Decode(e.to_string()))?;
        Ok(Self {
            values: pairs.into_iter().collect(),
        })
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }

    fn ack(&self) -> Result<AckCode, NvpError> {
        let ack = self
            .get("ACK")
            .ok_or_else(|| NvpError::Decode("missing ACK".to_string()))?;
        AckCode::from_str(ack).map_err(|_| NvpError::Decode(format!("unknown ACK '{ack}'")))
    }

    fn errors(&self) -> Vec<ApiError> {
        (0..)
            .map_while(|i| {
                let error_code = self.get(&format!("L_ERRORCODE{i}"));
                let short_message = self.get(&format!("L_SHORTMESSAGE{i}"));
                let long_message = self.get(&format!("L_LONGMESSAGE{i}"));
                if error_code.is_none() && short_message.is_none() && long_message.is_none() {
                    return None;
                }
                Some(ApiError {
                    error_code: error_code.unwrap_or_default().to_string(),
                    short_message: short_message.unwrap_or_default().to_string(),
                    long_message: long_message.unwrap_or_default().to_string(),
                    severity_code: self.get_or_empty(&format!("L_SEVERITYCODE{i}")),
                })
            })
            .collect()
    }

    fn payment_details(&self) -> Result<Vec<PaymentDetails>, NvpError> {
        let mut details = Vec::new();
        for i in 0.. {
            let Some(amount) = self.get(&format!("PAYMENTREQUEST_{i}_AMT")) else {
                break;
            };
            let currency = self
                .get(&format!("PAYMENTREQUEST_{i}_CURRENCYCODE"))
                .unwrap_or_default();
            let currency = CurrencyCode::from_str(currency)
                .map_err(|_| NvpError::Decode(format!("unknown currency '{currency}'")))?;
            let payment_action = match self.get(&format!("PAYMENTREQUEST_{i}_PAYMENTACTION")) {
                Some(action) => PaymentAction::from_str(action)
                    .map_err(|_| NvpError::Decode(format!("unknown payment action '{action}'")))?,
                None => PaymentAction::Sale,
            };
            details.push(PaymentDetails {
                order_total: BasicAmount {
                    currency,
                    value: amount.to_string(),
                },
                payment_action,
            });
        }
        Ok(details)
    }
}
