//! Trait seams of the gateway.
//!
//! [`api`] and [`connector_integration`] describe what a connector must
//! provide; [`connector_types`] groups those pieces into per-operation
//! capability traits; [`platform`] is the inverse direction, the host
//! platform services the gateway core calls back into.

pub mod api;
pub mod connector_integration;
pub mod connector_types;
pub mod platform;
pub mod verification;
