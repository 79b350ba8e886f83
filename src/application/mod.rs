//! Application layer: the gateway that orchestrates checkout sessions.
//!
//! `PayPalPaymentGateway` drives the processor's express-checkout API through
//! the ports defined in `domain::ports`, one remote call at a time.

pub mod paypal_gateway;
