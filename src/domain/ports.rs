use super::express_checkout::{
    DoExpressCheckoutPaymentRequest, DoExpressCheckoutPaymentResponse,
    GetExpressCheckoutDetailsRequest, GetExpressCheckoutDetailsResponse,
    SetExpressCheckoutRequest, SetExpressCheckoutResponse,
};
use super::order::{CustomerOrder, OrderResponseGroup};
use super::store::{GatewayConfig, Store};
use crate::error::{BoxError, Result};
use async_trait::async_trait;

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn get_by_id(
        &self,
        order_id: &str,
        response_group: OrderResponseGroup,
    ) -> Result<Option<CustomerOrder>>;
    async fn update(&self, orders: Vec<CustomerOrder>) -> Result<()>;
}

#[async_trait]
pub trait StoreService: Send + Sync {
    async fn get_by_id(&self, store_id: &str) -> Result<Option<Store>>;
}

/// Remote express-checkout operations.
///
/// Errors returned here are transport-level: the call did not produce a
/// readable response. A response that reports failure is returned as `Ok`.
#[async_trait]
pub trait ExpressCheckoutApi: Send + Sync {
    async fn set_express_checkout(
        &self,
        request: &SetExpressCheckoutRequest,
        config: &GatewayConfig,
    ) -> std::result::Result<SetExpressCheckoutResponse, BoxError>;

    async fn get_express_checkout_details(
        &self,
        request: &GetExpressCheckoutDetailsRequest,
        config: &GatewayConfig,
    ) -> std::result::Result<GetExpressCheckoutDetailsResponse, BoxError>;

    async fn do_express_checkout_payment(
        &self,
        request: &DoExpressCheckoutPaymentRequest,
        config: &GatewayConfig,
    ) -> std::result::Result<DoExpressCheckoutPaymentResponse, BoxError>;
}

pub type OrderStoreBox = Box<dyn OrderStore>;
pub type StoreServiceBox = Box<dyn StoreService>;
pub type ExpressCheckoutApiBox = Box<dyn ExpressCheckoutApi>;
