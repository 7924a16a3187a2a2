use common_enums::{Currency, TransactionStatus};
use common_utils::{ext_traits::Encode, pii::Email, types::MinorUnit, SecretSerdeValue};
use domain_types::{
    connector_types::{GatewayResponse, PaymentCaptureData, PaymentCreateOrderData, RequestDetails},
    errors::ConnectorError,
    router_data::ConnectorAuthType,
};
use error_stack::ResultExt;
use hyperswitch_masking::Secret;
use serde::{Deserialize, Serialize};

use crate::types::ResponseRouterData;

pub struct SoisyAuthType {
    /// Value of the `X-Auth-Token` header.
    pub auth_token: Secret<String>,
    /// Shop identifier embedded in the order endpoint path.
    pub shop_id: Secret<String>,
}

impl TryFrom<&ConnectorAuthType> for SoisyAuthType {
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(auth_type: &ConnectorAuthType) -> Result<Self, Self::Error> {
        match auth_type {
            ConnectorAuthType::BodyKey { api_key, key1 } => Ok(Self {
                auth_token: api_key.to_owned(),
                shop_id: key1.to_owned(),
            }),
            ConnectorAuthType::SignatureKey { api_key, key1, .. } => Ok(Self {
                auth_token: api_key.to_owned(),
                shop_id: key1.to_owned(),
            }),
            _ => Err(ConnectorError::FailedToObtainAuthType.into()),
        }
    }
}

/// Order payload for `POST /shops/{shopId}/orders`. Amounts travel as
/// integer cents; `order_reference` is the correlation id the provider
/// echoes back in every webhook.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SoisyPaymentRequest {
    pub email: Email,
    pub firstname: Secret<String>,
    pub lastname: Secret<String>,
    pub amount: MinorUnit,
    pub city: String,
    pub address: Secret<String>,
    pub postal_code: Secret<String>,
    pub success_url: String,
    pub error_url: String,
    pub callback_url: String,
    pub order_reference: String,
}

impl TryFrom<(MinorUnit, &PaymentCreateOrderData)> for SoisyPaymentRequest {
    type Error = error_stack::Report<ConnectorError>;

    fn try_from((amount, item): (MinorUnit, &PaymentCreateOrderData)) -> Result<Self, Self::Error> {
        if item.currency != Currency::EUR {
            return Err(ConnectorError::CurrencyNotSupported {
                message: item.currency.to_string(),
                connector: "soisy",
            }
            .into());
        }

        let billing_address = &item.billing_address;

        Ok(Self {
            email: item.email.clone(),
            firstname: billing_address.get_first_name()?,
            lastname: billing_address.get_last_name()?,
            amount,
            city: billing_address.get_city()?,
            address: billing_address.get_line1()?,
            postal_code: billing_address.get_zip()?,
            success_url: item.return_urls.success_url.clone(),
            error_url: item.return_urls.error_url.clone(),
            callback_url: item.return_urls.callback_url.clone(),
            order_reference: item.order_reference.clone(),
        })
    }
}

/// Whatever the provider answered for an order creation. Known fields are
/// typed; the rest ride along so the stored payload keeps the full body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoisyPaymentResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<url::Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<SoisyErrors>,
    #[serde(flatten)]
    pub additional_fields: serde_json::Map<String, serde_json::Value>,
}

impl SoisyPaymentResponse {
    /// Decoded body merged with the transport status code and the
    /// correlation id, provider fields winning on key collision. This is
    /// what the host stores as the attempt's payload.
    fn merged_payload(
        &self,
        http_code: u16,
        order_reference: &str,
    ) -> Result<serde_json::Value, error_stack::Report<ConnectorError>> {
        let encoded = self
            .encode_to_value()
            .change_context(ConnectorError::ParsingFailed)?;
        let serde_json::Value::Object(mut payload) = encoded else {
            return Err(ConnectorError::ResponseDeserializationFailed.into());
        };

        payload
            .entry("code")
            .or_insert_with(|| serde_json::Value::from(http_code));
        payload
            .entry("transactionHash")
            .or_insert_with(|| serde_json::Value::from(order_reference));

        Ok(serde_json::Value::Object(payload))
    }
}

impl TryFrom<ResponseRouterData<SoisyPaymentResponse>> for GatewayResponse {
    type Error = error_stack::Report<ConnectorError>;

    fn try_from(item: ResponseRouterData<SoisyPaymentResponse>) -> Result<Self, Self::Error> {
        let ResponseRouterData {
            response,
            order_reference,
            http_code,
        } = item;

        let payload = response.merged_payload(http_code, &order_reference)?;
        let message = response
            .errors
            .as_ref()
            .map(SoisyErrors::message)
            .unwrap_or_default();

        Ok(Self {
            success: response.errors.is_none(),
            message,
            transaction_hash: order_reference,
            status_code: http_code,
            redirect_url: response.redirect_url,
            payload: SecretSerdeValue::new(payload),
        })
    }
}

/// Capture acknowledgement. The provider settles disbursed loans on its
/// own, so the echo is all the host needs.
pub(crate) fn build_capture_response(
    item: &PaymentCaptureData,
    status_code: u16,
) -> GatewayResponse {
    GatewayResponse {
        success: true,
        message: String::new(),
        transaction_hash: item.transaction_hash.clone(),
        status_code,
        redirect_url: None,
        payload: SecretSerdeValue::new(serde_json::json!({
            "success": true,
            "transactionHash": item.transaction_hash,
        })),
    }
}

/// Validation failures come back as a field-keyed map of messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoisyErrorResponse {
    pub errors: SoisyErrors,
}

impl SoisyErrorResponse {
    pub fn message(&self) -> String {
        self.errors.message()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoisyErrors(pub serde_json::Value);

impl SoisyErrors {
    /// Flattens the provider's error map into one line, provider wording
    /// kept as is.
    pub fn message(&self) -> String {
        match &self.0 {
            serde_json::Value::Object(fields) => fields
                .iter()
                .map(|(field, messages)| format!("{}: {}", field, value_as_text(messages)))
                .collect::<Vec<_>>()
                .join("; "),
            other => value_as_text(other),
        }
    }
}

fn value_as_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text.clone(),
        serde_json::Value::Array(items) => items
            .iter()
            .map(value_as_text)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    }
}

/// Notification fields the provider posts to the callback URL. Everything
/// is optional on the wire; the connector decides which absences are
/// fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoisyWebhookBody {
    pub order_reference: Option<String>,
    pub event_id: Option<String>,
    pub event_message: Option<String>,
    pub order_token: Option<String>,
}

/// Loan lifecycle events the provider notifies about.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
pub enum SoisyEventId {
    LoanWasApproved,
    RequestCompleted,
    LoanWasVerified,
    LoanWasDisbursed,
    UserWasRejected,
}

impl From<SoisyEventId> for TransactionStatus {
    fn from(event: SoisyEventId) -> Self {
        match event {
            SoisyEventId::LoanWasApproved | SoisyEventId::RequestCompleted => Self::Pending,
            SoisyEventId::LoanWasVerified => Self::Processing,
            SoisyEventId::LoanWasDisbursed => Self::Success,
            SoisyEventId::UserWasRejected => Self::Failed,
        }
    }
}

/// Notifications arrive as JSON or form-urlencoded bodies, with query
/// parameters as a last resort. Everything is folded into one JSON object
/// so the full notification can be captured on the child entry.
pub(crate) fn decode_webhook_payload(
    request: &RequestDetails,
) -> Result<serde_json::Value, error_stack::Report<ConnectorError>> {
    if !request.body.is_empty() {
        if let Ok(payload) = serde_json::from_slice::<serde_json::Value>(&request.body) {
            return Ok(payload);
        }
        if let Ok(fields) = serde_urlencoded::from_bytes::<Vec<(String, String)>>(&request.body) {
            return Ok(fields_to_json(fields));
        }
    }

    match request.query_params.as_deref() {
        Some(query) if !query.is_empty() => {
            let fields: Vec<(String, String)> = serde_urlencoded::from_str(query)
                .change_context(ConnectorError::WebhookBodyDecodingFailed)?;
            Ok(fields_to_json(fields))
        }
        _ => Err(ConnectorError::WebhookBodyDecodingFailed.into()),
    }
}

fn fields_to_json(fields: Vec<(String, String)>) -> serde_json::Value {
    serde_json::Value::Object(
        fields
            .into_iter()
            .map(|(key, value)| (key, serde_json::Value::String(value)))
            .collect(),
    )
}
