use std::collections::HashSet;

use common_enums::Capability;
use common_utils::{types::FloatMajorUnit, CustomResult, SecretSerdeValue};
use domain_types::{
    connector_types::{
        ConnectorWebhookSecrets, GatewayResponse, PaymentCaptureData, PaymentCreateOrderData,
        PaymentFlowData, RequestDetails, WebhookDetailsResponse,
    },
    errors::ConnectorError,
    router_data::ConnectorAuthType,
    types::ConnectorParams,
};
use error_stack::ResultExt;
use hyperswitch_masking::Secret;

use crate::{
    api::ConnectorCommon, connector_integration::ConnectorIntegration,
    verification::SourceVerification,
};

/// Full surface a connector registers with the gateway core. Operations a
/// provider has no equivalent for keep the default rejecting
/// implementations.
pub trait ConnectorServiceTrait:
    ConnectorCommon
    + PaymentOrderCreate
    + PaymentCapture
    + PaymentAuthorize
    + PaymentCompleteAuthorize
    + PaymentCompletePurchase
    + RefundExecute
    + PaymentSourceManage
    + IncomingWebhook
    + ConnectorCapabilities
{
}

pub type BoxedConnector = Box<&'static (dyn ConnectorServiceTrait + Sync)>;

/// Place a purchase order with the provider.
pub trait PaymentOrderCreate: ConnectorIntegration<PaymentCreateOrderData, GatewayResponse> {}

/// Settle a previously placed order. Providers that settle on their own
/// schedule implement this without a wire call.
pub trait PaymentCapture: ConnectorIntegration<PaymentCaptureData, GatewayResponse> {}

/// An authorize entry point places the same provider order as a purchase.
/// A provider that separates the two would register its own integration
/// pair instead of reusing the order-create one.
pub trait PaymentAuthorize: ConnectorIntegration<PaymentCreateOrderData, GatewayResponse> {}

pub trait PaymentCompleteAuthorize: ConnectorCommon {
    fn complete_authorize(
        &self,
        _data: &PaymentFlowData,
        _request: &RequestDetails,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        Err(ConnectorError::NotSupported {
            message: "complete_authorize".to_string(),
            connector: self.id(),
        }
        .into())
    }
}

pub trait PaymentCompletePurchase: ConnectorCommon {
    fn complete_purchase(
        &self,
        _data: &PaymentFlowData,
        _request: &RequestDetails,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        Err(ConnectorError::NotSupported {
            message: "complete_purchase".to_string(),
            connector: self.id(),
        }
        .into())
    }
}

pub trait RefundExecute: ConnectorCommon {
    fn refund(
        &self,
        _data: &PaymentFlowData,
        _req: &PaymentCaptureData,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        Err(ConnectorError::NotSupported {
            message: "refund".to_string(),
            connector: self.id(),
        }
        .into())
    }
}

/// Stored payment source lifecycle, for providers that vault customer
/// payment details for reuse.
pub trait PaymentSourceManage: ConnectorCommon {
    fn create_payment_source(
        &self,
        _data: &PaymentFlowData,
        _source: &SecretSerdeValue,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        Err(ConnectorError::NotSupported {
            message: "create_payment_source".to_string(),
            connector: self.id(),
        }
        .into())
    }

    fn delete_payment_source(
        &self,
        _data: &PaymentFlowData,
        _token: &Secret<String>,
    ) -> CustomResult<GatewayResponse, ConnectorError> {
        Err(ConnectorError::NotSupported {
            message: "delete_payment_source".to_string(),
            connector: self.id(),
        }
        .into())
    }
}

pub trait IncomingWebhook: SourceVerification {
    /// fn get_webhook_source_verification_signature
    fn get_webhook_source_verification_signature(
        &self,
        _request: &RequestDetails,
        _connector_webhook_secret: &ConnectorWebhookSecrets,
    ) -> CustomResult<Vec<u8>, ConnectorError> {
        Ok(Vec::new())
    }

    /// fn get_webhook_source_verification_message
    fn get_webhook_source_verification_message(
        &self,
        request: &RequestDetails,
        _connector_webhook_secret: &ConnectorWebhookSecrets,
    ) -> CustomResult<Vec<u8>, ConnectorError> {
        Ok(request.body.clone())
    }

    fn verify_webhook_source(
        &self,
        request: &RequestDetails,
        connector_webhook_secret: Option<&ConnectorWebhookSecrets>,
        _connector_account_details: Option<&ConnectorAuthType>,
    ) -> CustomResult<bool, ConnectorError> {
        let secrets =
            connector_webhook_secret.ok_or(ConnectorError::WebhookVerificationSecretNotFound)?;
        let algorithm = self.get_algorithm()?;
        let signature = self.get_webhook_source_verification_signature(request, secrets)?;
        let message = self.get_webhook_source_verification_message(request, secrets)?;
        algorithm
            .verify_signature(&secrets.secret, &signature, &message)
            .change_context(ConnectorError::WebhookSourceVerificationFailed)
    }

    fn process_payment_webhook(
        &self,
        request: RequestDetails,
        connector_webhook_secret: Option<ConnectorWebhookSecrets>,
        connector_account_details: Option<ConnectorAuthType>,
    ) -> CustomResult<WebhookDetailsResponse, ConnectorError>;
}

/// Which operations a connector actually supports, surfaced to the host so
/// it can hide or grey out what the provider cannot do.
pub trait ConnectorCapabilities {
    fn capabilities(&self) -> HashSet<Capability>;

    fn supports(&self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Whether the connector will take an order of this total. Connectors
    /// without amount limits keep the default.
    fn available_for_use(&self, _total: FloatMajorUnit, _params: &ConnectorParams) -> bool {
        true
    }
}
