//! Connector implementations translating the gateway's domain types into
//! provider wire formats and back.

pub mod connectors;
pub mod types;
