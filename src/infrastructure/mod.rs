//! Adapters behind the domain ports: in-memory host stores and the HTTP
//! client for the processor's NVP API.

pub mod in_memory;
pub mod nvp;
