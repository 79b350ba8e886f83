#![allow(dead_code)]

use async_trait::async_trait;
use paypal_gateway::application::paypal_gateway::PayPalPaymentGateway;
use paypal_gateway::domain::express_checkout::{
    AckCode, ApiError, DoExpressCheckoutPaymentRequest, DoExpressCheckoutPaymentResponse,
    GetExpressCheckoutDetailsRequest, GetExpressCheckoutDetailsResponse, PayerInfo,
    PaymentAction, PaymentDetails, SetExpressCheckoutRequest, SetExpressCheckoutResponse,
};
use paypal_gateway::domain::gateway::PaymentGatewayType;
use paypal_gateway::domain::money::{BasicAmount, CurrencyCode, Money};
use paypal_gateway::domain::order::{CustomerOrder, OrderResponseGroup, PaymentIn};
use paypal_gateway::domain::ports::{ExpressCheckoutApi, OrderStore};
use paypal_gateway::domain::store::{
    API_PASSWORD_STORE_SETTING, API_SIGNATURE_STORE_SETTING, API_USERNAME_STORE_SETTING,
    GatewayConfig, MODE_STORE_SETTING, Store,
};
use paypal_gateway::error::{BoxError, Result};
use paypal_gateway::infrastructure::in_memory::{InMemoryOrderStore, InMemoryStoreService};
use rust_decimal_macros::dec;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const STORE_ID: &str = "store-1";
pub const STORE_URL: &str = "https://shop.example.com";
pub const ORDER_ID: &str = "order-1";

/// A remote call as seen by [`ScriptedApi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetExpressCheckout(SetExpressCheckoutRequest),
    GetExpressCheckoutDetails(String),
    DoExpressCheckoutPayment(DoExpressCheckoutPaymentRequest),
}

#[derive(Default)]
struct Script {
    set_responses: VecDeque<std::result::Result<SetExpressCheckoutResponse, String>>,
    details_responses: VecDeque<std::result::Result<GetExpressCheckoutDetailsResponse, String>>,
    capture_responses: VecDeque<std::result::Result<DoExpressCheckoutPaymentResponse, String>>,
    calls: Vec<Call>,
    modes: Vec<String>,
}

/// Fake processor API answering from queues of canned responses and recording
/// every call. Clones share the same script.
#[derive(Clone, Default)]
pub struct ScriptedApi {
    script: Arc<Mutex<Script>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_set(&self, response: SetExpressCheckoutResponse) -> &Self {
        self.script.lock().unwrap().set_responses.push_back(Ok(response));
        self
    }

    pub fn on_set_transport_error(&self, message: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .set_responses
            .push_back(Err(message.to_string()));
        self
    }

    pub fn on_details(&self, response: GetExpressCheckoutDetailsResponse) -> &Self {
        self.script
            .lock()
            .unwrap()
            .details_responses
            .push_back(Ok(response));
        self
    }

    pub fn on_details_transport_error(&self, message: &str) -> &Self {
        self.script
            .lock()
            .unwrap()
            .details_responses
            .push_back(Err(message.to_string()));
        self
    }

    pub fn on_capture(&self, response: DoExpressCheckoutPaymentResponse) -> &Self {
        self.script
            .lock()
            .unwrap()
            .capture_responses
            .push_back(Ok(response));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.script.lock().unwrap().calls.clone()
    }

    /// `mode` of the gateway configuration passed with each call.
    pub fn modes(&self) -> Vec<String> {
        self.script.lock().unwrap().modes.clone()
    }

    fn record(&self, call: Call, config: &GatewayConfig) {
        let mut script = self.script.lock().unwrap();
        script.calls.push(call);
        script.modes.push(config.mode().to_string());
    }
}

fn next<T>(queue: &mut VecDeque<std::result::Result<T, String>>) -> std::result::Result<T, BoxError> {
    match queue.pop_front() {
        Some(Ok(response)) => Ok(response),
        Some(Err(message)) => Err(message.into()),
        None => Err("no scripted response".into()),
    }
}

#[async_trait]
impl ExpressCheckoutApi for ScriptedApi {
    async fn set_express_checkout(
        &self,
        request: &SetExpressCheckoutRequest,
        config: &GatewayConfig,
    ) -> std::result::Result<SetExpressCheckoutResponse, BoxError> {
        self.record(Call::SetExpressCheckout(request.clone()), config);
        next(&mut self.script.lock().unwrap().set_responses)
    }

    async fn get_express_checkout_details(
        &self,
        request: &GetExpressCheckoutDetailsRequest,
        config: &GatewayConfig,
    ) -> std::result::Result<GetExpressCheckoutDetailsResponse, BoxError> {
        self.record(Call::GetExpressCheckoutDetails(request.token.clone()), config);
        next(&mut self.script.lock().unwrap().details_responses)
    }

    async fn do_express_checkout_payment(
        &self,
        request: &DoExpressCheckoutPaymentRequest,
        config: &GatewayConfig,
    ) -> std::result::Result<DoExpressCheckoutPaymentResponse, BoxError> {
        self.record(Call::DoExpressCheckoutPayment(request.clone()), config);
        next(&mut self.script.lock().unwrap().capture_responses)
    }
}

/// Order store that counts `update` calls.
#[derive(Clone, Default)]
pub struct CountingOrderStore {
    pub inner: InMemoryOrderStore,
    updates: Arc<AtomicUsize>,
}

impl CountingOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub async fn order(&self, order_id: &str) -> CustomerOrder {
        self.inner
            .get_by_id(order_id, OrderResponseGroup::Full)
            .await
            .unwrap()
            .unwrap()
    }
}

#[async_trait]
impl OrderStore for CountingOrderStore {
    async fn get_by_id(
        &self,
        order_id: &str,
        response_group: OrderResponseGroup,
    ) -> Result<Option<CustomerOrder>> {
        self.inner.get_by_id(order_id, response_group).await
    }

    async fn update(&self, orders: Vec<CustomerOrder>) -> Result<()> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update(orders).await
    }
}

pub fn configured_store() -> Store {
    Store::new(STORE_ID, STORE_URL)
        .with_setting(MODE_STORE_SETTING, "sandbox")
        .with_setting(API_USERNAME_STORE_SETTING, "merchant_api1.example.com")
        .with_setting(API_PASSWORD_STORE_SETTING, "secret")
        .with_setting(API_SIGNATURE_STORE_SETTING, "signature")
}

pub fn order_with_payment(payment: PaymentIn) -> CustomerOrder {
    let mut order = CustomerOrder::new(ORDER_ID, STORE_ID, "USD");
    order.in_payments.push(payment);
    order
}

pub fn pending_payment() -> PaymentIn {
    PaymentIn::new("pay-1", Money::new(dec!(19.5)))
}

pub fn payment_with_token(token: &str) -> PaymentIn {
    let mut payment = pending_payment();
    payment.outer_id = Some(token.to_string());
    payment
}

pub fn set_success(token: &str) -> SetExpressCheckoutResponse {
    SetExpressCheckoutResponse {
        token: token.to_string(),
        ack: AckCode::Success,
        errors: vec![],
    }
}

pub fn insufficient_funds() -> Vec<ApiError> {
    vec![ApiError {
        error_code: "10486".to_string(),
        short_message: "Declined".to_string(),
        long_message: "Insufficient funds".to_string(),
        severity_code: "Error".to_string(),
    }]
}

pub fn details(token: &str, checkout_status: &str) -> GetExpressCheckoutDetailsResponse {
    GetExpressCheckoutDetailsResponse {
        token: token.to_string(),
        checkout_status: checkout_status.to_string(),
        payer_info: PayerInfo {
            payer_id: "PAYER-1".to_string(),
            email: Some("buyer@example.com".to_string()),
        },
        payment_details: vec![PaymentDetails {
            order_total: BasicAmount::new(CurrencyCode::Usd, Money::new(dec!(19.5))),
            payment_action: PaymentAction::Sale,
        }],
        ack: AckCode::Success,
        errors: vec![],
    }
}

pub fn capture_success(token: &str) -> DoExpressCheckoutPaymentResponse {
    DoExpressCheckoutPaymentResponse {
        token: token.to_string(),
        payment_info: vec![],
        ack: AckCode::Success,
        errors: vec![],
    }
}

/// Everything a test needs to drive the gateway and inspect its effects.
pub struct Harness {
    pub gateway: PayPalPaymentGateway,
    pub api: ScriptedApi,
    pub orders: CountingOrderStore,
    pub stores: InMemoryStoreService,
}

impl Harness {
    pub async fn new(store: Store, orders: Vec<CustomerOrder>) -> Self {
        let api = ScriptedApi::new();
        let order_store = CountingOrderStore::new();
        let stores = InMemoryStoreService::new();

        stores.insert(store).await;
        for order in orders {
            order_store.inner.insert(order).await;
        }

        let gateway = PayPalPaymentGateway::builder()
            .gateway_code("PayPal")
            .description("PayPal express checkout")
            .logo_url("https://example.com/paypal.png")
            .gateway_type(PaymentGatewayType::Redirection)
            .order_store(Box::new(order_store.clone()))
            .store_service(Box::new(stores.clone()))
            .api(Box::new(api.clone()))
            .build()
            .unwrap();

        Self {
            gateway,
            api,
            orders: order_store,
            stores,
        }
    }
}
