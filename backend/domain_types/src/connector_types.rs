use std::collections::HashMap;

use common_enums::{Currency, TransactionStatus};
use common_utils::{pii::Email, request::Method, types::MinorUnit, SecretSerdeValue};
use hyperswitch_masking::{PeekInterface, Secret};

use crate::{
    router_data::ConnectorAuthType, transaction::BillingAddress, types::Connectors,
};

/// Connectors wired into the gateway. Config sections and log tags use
/// the lowercase form.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectorEnum {
    Soisy,
}

/// Account and environment context shared by every connector operation in
/// a flow: which endpoints to talk to and with which credentials.
#[derive(Debug, Clone)]
pub struct PaymentFlowData {
    pub connectors: Connectors,
    pub auth: ConnectorAuthType,
    /// Route calls to the provider's sandbox instead of the live
    /// environment.
    pub test_mode: bool,
}

/// One configured gateway instance on the host platform: which connector
/// it runs, the merchant credentials, and the environment toggles the
/// merchant picked when setting the gateway up.
#[derive(Debug, Clone)]
pub struct GatewayAccount {
    pub connector: ConnectorEnum,
    pub auth: ConnectorAuthType,
    /// Talk to the provider's sandbox environment.
    pub test_mode: bool,
    /// Locale used when localizing provider event descriptions for the
    /// ledger, e.g. `"en"` or `"it"`.
    pub locale: String,
}

impl GatewayAccount {
    pub fn new(connector: ConnectorEnum, auth: ConnectorAuthType) -> Self {
        Self {
            connector,
            auth,
            test_mode: false,
            locale: "en".to_string(),
        }
    }

    /// Webhook signing material for this account. The providers wired in
    /// so far sign notifications with the account's API secret, so a
    /// dedicated webhook secret only exists for auth types that carry one.
    pub fn webhook_secrets(&self) -> Option<ConnectorWebhookSecrets> {
        match &self.auth {
            ConnectorAuthType::SignatureKey { api_secret, .. } => Some(ConnectorWebhookSecrets {
                secret: api_secret.peek().as_bytes().to_vec(),
                additional_secret: None,
            }),
            ConnectorAuthType::HeaderKey { .. }
            | ConnectorAuthType::BodyKey { .. }
            | ConnectorAuthType::NoKey => None,
        }
    }
}

/// Everything a connector needs to place a purchase order with the
/// provider. Assembled by the gateway core from the host's order and
/// transaction records.
#[derive(Debug, Clone)]
pub struct PaymentCreateOrderData {
    /// Amount in the currency's minor unit, already converted from the
    /// order total.
    pub amount: MinorUnit,
    pub currency: Currency,
    pub email: Email,
    pub billing_address: BillingAddress,
    pub return_urls: ReturnUrls,
    /// Correlation id threaded through to the provider and echoed back in
    /// webhook notifications. This is the transaction hash.
    pub order_reference: String,
}

/// Capture input. The provider settles installment loans on its own
/// schedule, so capture never reaches the wire; the data is retained for
/// the response echo.
#[derive(Debug, Clone)]
pub struct PaymentCaptureData {
    pub transaction_hash: String,
    pub amount: MinorUnit,
    pub currency: Currency,
}

/// Absolute URLs the provider redirects or calls back to after checkout.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ReturnUrls {
    pub success_url: String,
    pub error_url: String,
    pub callback_url: String,
}

/// The gateway's normalized view of one provider interaction, handed back
/// to the host so it can decide whether to proceed, redirect or fail the
/// checkout. Constructed once per interaction and never mutated.
#[derive(Debug, Clone, serde::Serialize)]
pub struct GatewayResponse {
    pub success: bool,
    pub message: String,
    pub transaction_hash: String,
    pub status_code: u16,
    /// Where to send the customer next, when the provider issued a
    /// redirect target.
    pub redirect_url: Option<url::Url>,
    /// Decoded provider response body, merged with the HTTP status code
    /// and the transaction hash.
    pub payload: SecretSerdeValue,
}

/// Inbound webhook request exactly as the host's HTTP layer received it.
/// The connector owns decoding; the gateway core never inspects the body.
#[derive(Debug, Clone)]
pub struct RequestDetails {
    pub method: Method,
    pub uri: Option<String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub query_params: Option<String>,
}

/// Secret material used to verify that an inbound webhook really came from
/// the provider.
#[derive(Debug, Clone)]
pub struct ConnectorWebhookSecrets {
    pub secret: Vec<u8>,
    pub additional_secret: Option<Secret<String>>,
}

/// A provider notification after the connector has decoded and mapped it.
#[derive(Debug, Clone)]
pub struct WebhookDetailsResponse {
    /// Transaction hash of the originating purchase attempt.
    pub order_reference: String,
    /// Raw event identifier as sent by the provider.
    pub event_code: String,
    /// Event description with placeholder encoding undone, ready for
    /// catalog lookup. Absent when the provider sent none.
    pub event_message: Option<String>,
    /// Provider-side order token accompanying the event.
    pub order_token: Option<String>,
    /// Ledger status the event maps to. `None` for event codes the
    /// connector does not recognize; the entry is still recorded.
    pub status: Option<TransactionStatus>,
    /// Entire decoded notification body, persisted on the child entry.
    pub raw_payload: SecretSerdeValue,
}

/// Response the host should return to the provider for a webhook delivery.
/// The provider only wants an empty acknowledgement; anything else makes
/// it retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookAcknowledgement {
    pub status_code: u16,
    pub body: String,
}

impl Default for WebhookAcknowledgement {
    fn default() -> Self {
        Self {
            status_code: 200,
            body: String::new(),
        }
    }
}
