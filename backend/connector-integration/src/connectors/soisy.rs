#[cfg(test)]
mod test;
pub mod transformers;

use std::{collections::HashSet, str::FromStr};

use common_enums::{Capability, Currency, TransactionStatus};
use common_utils::{
    consts, crypto,
    errors::CustomResult,
    ext_traits::BytesExt,
    request::{Request, RequestContent},
    types::{AmountConvertor, FloatMajorUnit, MinorUnit, MinorUnitForConnector},
    SecretSerdeValue,
};
use domain_types::{
    connector_types::{
        ConnectorWebhookSecrets, GatewayResponse, PaymentCaptureData, PaymentCreateOrderData,
        PaymentFlowData, RequestDetails, WebhookDetailsResponse,
    },
    errors::ConnectorError,
    router_data::{ConnectorAuthType, ErrorResponse},
    router_response_types::Response,
    types::{ConnectorParams, Connectors},
    utils,
};
use error_stack::ResultExt;
use hyperswitch_masking::{ExposeInterface, Mask, Maskable, PeekInterface};
use interfaces::{
    api::ConnectorCommon,
    connector_integration::ConnectorIntegration,
    connector_types::{self, ConnectorCapabilities, IncomingWebhook},
    verification::SourceVerification,
};
use transformers as soisy;

use crate::types::ResponseRouterData;

pub(crate) mod headers {
    pub(crate) const CONTENT_TYPE: &str = "Content-Type";
    pub(crate) const X_AUTH_TOKEN: &str = "X-Auth-Token";
    pub(crate) const X_SOISY_SIGNATURE: &str = "x-soisy-signature";
}

/// Live API endpoint, used when no override is configured.
const SOISY_API_URL: &str = "https://api.soisy.it/api";

/// Sandbox API endpoint, used when the account runs in test mode.
const SOISY_SANDBOX_API_URL: &str = "https://api.sandbox.soisy.it/api";

/// Smallest order total the provider finances, in euros.
const SOISY_MIN_ORDER_TOTAL: f64 = 100.0;

/// Largest order total the provider finances, in euros.
const SOISY_MAX_ORDER_TOTAL: f64 = 15000.0;

#[derive(Clone)]
pub struct Soisy {
    amount_converter: &'static (dyn AmountConvertor<Output = MinorUnit> + Sync),
}

impl Soisy {
    pub const fn new() -> &'static Self {
        &Self {
            amount_converter: &MinorUnitForConnector,
        }
    }

    fn build_headers(
        &self,
        data: &PaymentFlowData,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        let mut header = vec![(
            headers::CONTENT_TYPE.to_string(),
            self.common_get_content_type().to_string().into(),
        )];
        let mut api_key = self.get_auth_header(&data.auth)?;
        header.append(&mut api_key);
        Ok(header)
    }
}

fn convert_amount(
    amount_convertor: &dyn AmountConvertor<Output = MinorUnit>,
    amount: MinorUnit,
    currency: Currency,
) -> Result<MinorUnit, error_stack::Report<ConnectorError>> {
    amount_convertor
        .convert(amount, currency)
        .change_context(ConnectorError::AmountConversionFailed)
}

impl ConnectorCommon for Soisy {
    fn id(&self) -> &'static str {
        "soisy"
    }

    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    fn base_url<'a>(&self, connectors: &'a Connectors, test_mode: bool) -> &'a str {
        let params = &connectors.soisy;
        if test_mode {
            params
                .sandbox_base_url
                .as_deref()
                .unwrap_or(SOISY_SANDBOX_API_URL)
        } else if params.base_url.is_empty() {
            SOISY_API_URL
        } else {
            params.base_url.as_ref()
        }
    }

    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        let auth = soisy::SoisyAuthType::try_from(auth_type)
            .change_context(ConnectorError::FailedToObtainAuthType)?;
        Ok(vec![(
            headers::X_AUTH_TOKEN.to_string(),
            auth.auth_token.expose().into_masked(),
        )])
    }

    fn build_error_response(&self, res: Response) -> CustomResult<ErrorResponse, ConnectorError> {
        let response: Result<soisy::SoisyErrorResponse, _> =
            res.response.parse_struct("SoisyErrorResponse");

        match response {
            Ok(response) => Ok(ErrorResponse {
                status_code: res.status_code,
                code: consts::NO_ERROR_CODE.to_string(),
                message: response.message(),
                reason: Some(String::from_utf8_lossy(&res.response).into_owned()),
                connector_transaction_id: None,
            }),
            Err(error_msg) => {
                tracing::error!(deserialization_error =? error_msg);
                utils::handle_json_response_deserialization_failure(res, "soisy")
            }
        }
    }
}

impl connector_types::PaymentAuthorize for Soisy {}
impl connector_types::PaymentOrderCreate for Soisy {}
impl connector_types::PaymentCapture for Soisy {}
impl connector_types::PaymentCompleteAuthorize for Soisy {}
impl connector_types::PaymentCompletePurchase for Soisy {}
impl connector_types::RefundExecute for Soisy {}
impl connector_types::PaymentSourceManage for Soisy {}
impl connector_types::ConnectorServiceTrait for Soisy {}

impl ConnectorIntegration<PaymentCreateOrderData, GatewayResponse> for Soisy {
    fn get_headers(
        &self,
        data: &PaymentFlowData,
        _req: &PaymentCreateOrderData,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        self.build_headers(data)
    }

    fn get_url(
        &self,
        data: &PaymentFlowData,
        _req: &PaymentCreateOrderData,
    ) -> CustomResult<String, ConnectorError> {
        let auth = soisy::SoisyAuthType::try_from(&data.auth)
            .change_context(ConnectorError::FailedToObtainAuthType)?;
        Ok(format!(
            "{}/shops/{}/orders",
            self.base_url(&data.connectors, data.test_mode),
            auth.shop_id.peek(),
        ))
    }

    fn get_request_body(
        &self,
        _data: &PaymentFlowData,
        req: &PaymentCreateOrderData,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        let amount = convert_amount(self.amount_converter, req.amount, req.currency)?;
        let connector_req = soisy::SoisyPaymentRequest::try_from((amount, req))?;
        Ok(Some(RequestContent::Json(Box::new(connector_req))))
    }

    fn handle_response(
        &self,
        _data: &PaymentFlowData,
        req: &PaymentCreateOrderData,
        res: Response,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        let response: soisy::SoisyPaymentResponse = res
            .response
            .parse_struct("SoisyPaymentResponse")
            .change_context(ConnectorError::ResponseDeserializationFailed)?;
        GatewayResponse::try_from(ResponseRouterData {
            response,
            order_reference: req.order_reference.clone(),
            http_code: res.status_code,
        })
    }
}

impl ConnectorIntegration<PaymentCaptureData, GatewayResponse> for Soisy {
    // Installment loans settle on the provider's own schedule; there is no
    // capture endpoint to call.
    fn build_request(
        &self,
        _data: &PaymentFlowData,
        _req: &PaymentCaptureData,
    ) -> CustomResult<Option<Request>, ConnectorError> {
        Ok(None)
    }

    fn handle_response(
        &self,
        _data: &PaymentFlowData,
        req: &PaymentCaptureData,
        res: Response,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        Ok(soisy::build_capture_response(req, res.status_code))
    }
}

impl SourceVerification for Soisy {
    fn get_algorithm(
        &self,
    ) -> CustomResult<Box<dyn crypto::VerifySignature + Send>, ConnectorError> {
        Ok(Box::new(crypto::HmacSha256))
    }
}

impl IncomingWebhook for Soisy {
    fn get_webhook_source_verification_signature(
        &self,
        request: &RequestDetails,
        _connector_webhook_secret: &ConnectorWebhookSecrets,
    ) -> CustomResult<Vec<u8>, ConnectorError> {
        let security_header = request
            .headers
            .get(headers::X_SOISY_SIGNATURE)
            .ok_or(ConnectorError::WebhookSignatureNotFound)?;

        hex::decode(security_header).change_context(ConnectorError::WebhookSignatureNotFound)
    }

    fn process_payment_webhook(
        &self,
        request: RequestDetails,
        _connector_webhook_secret: Option<ConnectorWebhookSecrets>,
        _connector_account_details: Option<ConnectorAuthType>,
    ) -> CustomResult<WebhookDetailsResponse, ConnectorError> {
        let payload = soisy::decode_webhook_payload(&request)?;
        let webhook_body: soisy::SoisyWebhookBody = serde_json::from_value(payload.clone())
            .change_context(ConnectorError::WebhookBodyDecodingFailed)?;

        let order_reference = webhook_body
            .order_reference
            .ok_or(ConnectorError::WebhookReferenceIdNotFound)?;
        let event_code = webhook_body
            .event_id
            .ok_or(ConnectorError::WebhookEventTypeNotFound)?;

        // Unrecognized events still produce an entry, just without a
        // status.
        let status = soisy::SoisyEventId::from_str(&event_code)
            .ok()
            .map(TransactionStatus::from);
        let event_message = webhook_body
            .event_message
            .map(|message| message.replace("%20", " "));

        Ok(WebhookDetailsResponse {
            order_reference,
            event_code,
            event_message,
            order_token: webhook_body.order_token,
            status,
            raw_payload: SecretSerdeValue::new(payload),
        })
    }
}

impl ConnectorCapabilities for Soisy {
    fn capabilities(&self) -> HashSet<Capability> {
        HashSet::from([
            Capability::Authorize,
            Capability::Purchase,
            Capability::Capture,
            Capability::Webhooks,
        ])
    }

    fn available_for_use(&self, total: FloatMajorUnit, params: &ConnectorParams) -> bool {
        let min = params
            .min_order_total
            .unwrap_or(FloatMajorUnit::new(SOISY_MIN_ORDER_TOTAL));
        let max = params
            .max_order_total
            .unwrap_or(FloatMajorUnit::new(SOISY_MAX_ORDER_TOTAL));
        total >= min && total <= max
    }
}
