//! Domain model shared between the gateway core and connector integrations.
//!
//! Everything the two sides exchange lives here: the platform-side ledger
//! types ([`transaction`]), the connector-side request/response payloads
//! ([`connector_types`]), authentication material ([`router_data`]) and the
//! error vocabulary ([`errors`]).

pub mod connector_types;
pub mod errors;
pub mod router_data;
pub mod router_response_types;
pub mod transaction;
pub mod types;
pub mod utils;

pub use connector_types::{
    ConnectorEnum, ConnectorWebhookSecrets, GatewayAccount, GatewayResponse, PaymentCaptureData,
    PaymentCreateOrderData, PaymentFlowData, RequestDetails, ReturnUrls, WebhookAcknowledgement,
    WebhookDetailsResponse,
};
pub use router_data::{ConnectorAuthType, ErrorResponse};
pub use router_response_types::Response;
pub use transaction::{BillingAddress, Order, Transaction};
pub use types::{ConnectorParams, Connectors, Proxy};
