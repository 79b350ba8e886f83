//! Domain model: orders, stores, money, the processor's wire types, and the
//! ports the gateway is wired through.

pub mod express_checkout;
pub mod gateway;
pub mod money;
pub mod order;
pub mod ports;
pub mod store;
