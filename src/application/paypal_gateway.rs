use crate::domain::express_checkout::{
    DoExpressCheckoutPaymentRequest, GetExpressCheckoutDetailsRequest,
    GetExpressCheckoutDetailsResponse, PaymentAction, PaymentDetails, SetExpressCheckoutRequest,
    SolutionType, check_response,
};
use crate::domain::gateway::{PaymentGateway, PaymentGatewayType, PaymentInfo};
use crate::domain::money::{BasicAmount, CurrencyCode};
use crate::domain::order::{CustomerOrder, OperationProperty, OrderResponseGroup, PaymentIn};
use crate::domain::ports::{ExpressCheckoutApiBox, OrderStoreBox, StoreServiceBox};
use crate::domain::store::{Environment, GatewayConfig, Store};
use crate::error::{GatewayError, Result};
use async_trait::async_trait;
use tracing::{info, warn};
use url::form_urlencoded;

/// Payment property carrying the processor page the buyer must visit.
pub const REDIRECT_URL_PROPERTY: &str = "RedirectUrl";
/// Payment property echoing the gateway type that created the session.
pub const GATEWAY_TYPE_PROPERTY: &str = "GatewayType";

/// Seconds the processor waits on the store's callback.
const CALLBACK_TIMEOUT: &str = "3";

/// Express-checkout gateway backed by PayPal.
///
/// The gateway holds no mutable state: everything that changes during a
/// checkout lives on the order and payment passed in, so one instance can
/// serve concurrent checkouts for different orders.
pub struct PayPalPaymentGateway {
    gateway_code: String,
    description: String,
    logo_url: String,
    gateway_type: PaymentGatewayType,
    order_store: OrderStoreBox,
    store_service: StoreServiceBox,
    api: ExpressCheckoutApiBox,
}

impl PayPalPaymentGateway {
    /// Creates a new gateway.
    ///
    /// # Arguments
    ///
    /// * `gateway_code` - Code the host registers the gateway under. Also used
    ///   in the callback URL.
    /// * `description` - Human readable name.
    /// * `logo_url` - Logo shown at checkout.
    /// * `gateway_type` - How the host should drive the payment.
    /// * `order_store` - Orders are read from and persisted to this store.
    /// * `store_service` - Source of store URLs and processor credentials.
    /// * `api` - The remote express-checkout API.
    ///
    /// Fails with `InvalidArgument` when any of the descriptive fields is empty.
    pub fn new(
        gateway_code: impl Into<String>,
        description: impl Into<String>,
        logo_url: impl Into<String>,
        gateway_type: PaymentGatewayType,
        order_store: OrderStoreBox,
        store_service: StoreServiceBox,
        api: ExpressCheckoutApiBox,
    ) -> Result<Self> {
        let gateway_code = non_empty(gateway_code.into(), "gateway_code")?;
        let description = non_empty(description.into(), "description")?;
        let logo_url = non_empty(logo_url.into(), "logo_url")?;

        Ok(Self {
            gateway_code,
            description,
            logo_url,
            gateway_type,
            order_store,
            store_service,
            api,
        })
    }

    pub fn builder() -> PayPalPaymentGatewayBuilder {
        PayPalPaymentGatewayBuilder::default()
    }

    async fn store_with_url(&self, store_id: &str) -> Result<Store> {
        self.store_service
            .get_by_id(store_id)
            .await?
            .filter(Store::has_url)
            .ok_or_else(|| GatewayError::NotFound(format!("no store with id '{store_id}'")))
    }

    fn callback_url(&self, store: &Store, order_id: &str, cancel: bool) -> String {
        format!(
            "{}/admin/api/paymentgateway/{}/push?cancel={}&orderId={}&redirectUrl={}",
            store.url.trim_end_matches('/'),
            self.gateway_code.to_lowercase(),
            cancel,
            url_encode(order_id),
            url_encode(&store.url),
        )
    }

    fn set_express_checkout_request(
        &self,
        order: &CustomerOrder,
        store: &Store,
        payment: &PaymentIn,
    ) -> Result<SetExpressCheckoutRequest> {
        let currency = CurrencyCode::parse(&order.currency)?;

        Ok(SetExpressCheckoutRequest {
            return_url: self.callback_url(store, &order.id, false),
            cancel_url: self.callback_url(store, &order.id, true),
            callback_timeout: CALLBACK_TIMEOUT.to_string(),
            solution_type: SolutionType::Mark,
            buyer_email: order.buyer_email().map(str::to_string),
            payment_details: vec![PaymentDetails {
                order_total: BasicAmount::new(currency, payment.sum),
                payment_action: PaymentAction::Sale,
            }],
        })
    }

    async fn checkout_details(
        &self,
        request: &GetExpressCheckoutDetailsRequest,
        config: &GatewayConfig,
    ) -> Result<GetExpressCheckoutDetailsResponse> {
        let response = self
            .api
            .get_express_checkout_details(request, config)
            .await
            .map_err(|e| GatewayError::unavailable("GetExpressCheckoutDetails call failed", e))?;
        check_response(Some(&response))
            .inspect_err(|e| warn!(error = %e, "checkout details rejected"))?;
        Ok(response)
    }
}

#[async_trait]
impl PaymentGateway for PayPalPaymentGateway {
    fn gateway_code(&self) -> &str {
        &self.gateway_code
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn logo_url(&self) -> &str {
        &self.logo_url
    }

    fn gateway_type(&self) -> PaymentGatewayType {
        self.gateway_type
    }

    #[tracing::instrument(
        skip_all,
        fields(gateway = %self.gateway_code, order_id = %order.id, payment_id = %payment.id)
    )]
    async fn create_payment(&self, payment: &mut PaymentIn, order: &CustomerOrder) -> Result<()> {
        let store = self.store_with_url(&order.store_id).await?;
        let config = GatewayConfig::from_store(&store)?;
        let request = self.set_express_checkout_request(order, &store, payment)?;

        let response = self
            .api
            .set_express_checkout(&request, &config)
            .await
            .map_err(|e| GatewayError::unavailable("SetExpressCheckout call failed", e))?;
        check_response(Some(&response))
            .inspect_err(|e| warn!(error = %e, "express checkout rejected"))?;

        let redirect_url = hosted_checkout_url(config.environment(), &response.token);
        payment.outer_id = Some(response.token.clone());
        payment.properties = vec![
            OperationProperty::short_text(REDIRECT_URL_PROPERTY, redirect_url),
            OperationProperty::short_text(GATEWAY_TYPE_PROPERTY, self.gateway_type.to_string()),
        ];

        info!(token = %response.token, "express checkout session created");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(gateway = %self.gateway_code))]
    async fn get_payment(&self, payment_id: &str, order_id: &str) -> Result<PaymentInfo> {
        let mut order = self
            .order_store
            .get_by_id(order_id, OrderResponseGroup::Full)
            .await?
            .ok_or_else(|| GatewayError::NotFound(format!("no order with id '{order_id}'")))?;

        let store = self.store_with_url(&order.store_id).await?;

        let no_payment =
            || GatewayError::NotFound(format!("no payment with token '{payment_id}' in order"));
        if order.payment_by_outer_id(payment_id).is_none() {
            return Err(no_payment());
        }

        let config = GatewayConfig::from_store(&store)?;

        let details_request = GetExpressCheckoutDetailsRequest {
            token: payment_id.to_string(),
        };
        let details = self.checkout_details(&details_request, &config).await?;

        let capture_request = DoExpressCheckoutPaymentRequest::from_details(payment_id, &details);
        let capture = self
            .api
            .do_express_checkout_payment(&capture_request, &config)
            .await
            .map_err(|e| GatewayError::unavailable("DoExpressCheckoutPayment call failed", e))?;
        // The refreshed checkout status decides approval, not the capture ack.
        if let Err(e) = check_response(Some(&capture)) {
            warn!(error = %e, "capture reported errors");
        }

        let refreshed = self.checkout_details(&details_request, &config).await?;
        let is_approved = refreshed.is_completed();

        order.payment_by_outer_id_mut(payment_id).ok_or_else(no_payment)?.is_approved = is_approved;
        self.order_store.update(vec![order]).await?;

        info!(is_approved, checkout_status = %refreshed.checkout_status, "payment confirmed");

        // isSuccess is always reported as true, whatever the approval outcome.
        Ok(PaymentInfo::DirectRedirectUrl {
            is_approved,
            redirect_url: format!(
                "{}/checkout/thanks?orderId={}&isSuccess=true",
                store.url.trim_end_matches('/'),
                order_id
            ),
        })
    }
}

/// Builder for [`PayPalPaymentGateway`] that reports absent collaborators as
/// `InvalidArgument` instead of requiring them up front.
#[derive(Default)]
pub struct PayPalPaymentGatewayBuilder {
    gateway_code: String,
    description: String,
    logo_url: String,
    gateway_type: Option<PaymentGatewayType>,
    order_store: Option<OrderStoreBox>,
    store_service: Option<StoreServiceBox>,
    api: Option<ExpressCheckoutApiBox>,
}

impl PayPalPaymentGatewayBuilder {
    pub fn gateway_code(mut self, code: impl Into<String>) -> Self {
        self.gateway_code = code.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn logo_url(mut self, logo_url: impl Into<String>) -> Self {
        self.logo_url = logo_url.into();
        self
    }

    pub fn gateway_type(mut self, gateway_type: PaymentGatewayType) -> Self {
        self.gateway_type = Some(gateway_type);
        self
    }

    pub fn order_store(mut self, order_store: OrderStoreBox) -> Self {
        self.order_store = Some(order_store);
        self
    }

    pub fn store_service(mut self, store_service: StoreServiceBox) -> Self {
        self.store_service = Some(store_service);
        self
    }

    pub fn api(mut self, api: ExpressCheckoutApiBox) -> Self {
        self.api = Some(api);
        self
    }

    pub fn build(self) -> Result<PayPalPaymentGateway> {
        let missing = |name: &str| GatewayError::InvalidArgument(format!("{name} is required"));

        PayPalPaymentGateway::new(
            self.gateway_code,
            self.description,
            self.logo_url,
            self.gateway_type.unwrap_or(PaymentGatewayType::Redirection),
            self.order_store.ok_or_else(|| missing("order_store"))?,
            self.store_service.ok_or_else(|| missing("store_service"))?,
            self.api.ok_or_else(|| missing("api"))?,
        )
    }
}

fn non_empty(value: String, name: &str) -> Result<String> {
    if value.is_empty() {
        Err(GatewayError::InvalidArgument(format!("{name} must not be empty")))
    } else {
        Ok(value)
    }
}

fn url_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

fn hosted_checkout_url(environment: Environment, token: &str) -> String {
    format!(
        "{}?cmd=_express-checkout&useraction=commit&token={}",
        environment.checkout_url(),
        url_encode(token)
    )
}
