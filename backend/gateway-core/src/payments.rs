//! Checkout submission and webhook processing.
//!
//! [`Payments`] is the piece the host platform embeds: it resolves orders
//! and transactions through the platform ports, drives the configured
//! connector over the wire, and appends the resulting ledger entries. One
//! instance serves every configured gateway account.

use std::sync::Arc;

use common_enums::Capability;
use common_utils::{
    consts,
    types::{AmountConvertor, FloatMajorUnit, FloatMajorUnitForConnector},
    CustomResult, SecretSerdeValue,
};
use connector_integration::types::ConnectorData;
use domain_types::{
    connector_types::{
        GatewayAccount, GatewayResponse, PaymentCaptureData, PaymentCreateOrderData,
        PaymentFlowData, RequestDetails, WebhookAcknowledgement,
    },
    errors::{ApiError, ApplicationErrorResponse, ConnectorError},
    router_data::ErrorResponse,
    transaction::{Order, Transaction},
};
use error_stack::{report, ResultExt};
use external_services::execute_connector_processing_step;
use hyperswitch_masking::Secret;
use interfaces::{
    api::ConnectorCommon,
    connector_integration::{BoxedConnectorIntegration, ConnectorIntegrationAny},
    connector_types::{
        ConnectorCapabilities, IncomingWebhook, PaymentCompleteAuthorize, PaymentCompletePurchase,
        PaymentSourceManage, RefundExecute,
    },
    platform::{MessageCatalog, OrderAccess, PlatformError, RouteProvider, TransactionStore},
};

use crate::{configs::Config, error::ReportSwitchExt};

/// Gateway service layer. Holds the loaded configuration plus the host
/// platform ports; connectors themselves are stateless statics resolved
/// per call.
pub struct Payments {
    config: Arc<Config>,
    transactions: Arc<dyn TransactionStore>,
    orders: Arc<dyn OrderAccess>,
    routes: Arc<dyn RouteProvider>,
    messages: Arc<dyn MessageCatalog>,
}

impl Payments {
    pub fn new(
        config: Arc<Config>,
        transactions: Arc<dyn TransactionStore>,
        orders: Arc<dyn OrderAccess>,
        routes: Arc<dyn RouteProvider>,
        messages: Arc<dyn MessageCatalog>,
    ) -> Self {
        Self {
            config,
            transactions,
            orders,
            routes,
            messages,
        }
    }

    /// Authorize-style checkout entry point. The installment providers
    /// wired in today do not distinguish authorization from purchase, so
    /// both place the same provider order; the difference lives in the
    /// host's capture timing.
    pub async fn authorize(
        &self,
        account: &GatewayAccount,
        transaction: &Transaction,
    ) -> CustomResult<GatewayResponse, ApplicationErrorResponse> {
        self.submit_order(account, transaction).await
    }

    /// Purchase-style checkout entry point.
    pub async fn purchase(
        &self,
        account: &GatewayAccount,
        transaction: &Transaction,
    ) -> CustomResult<GatewayResponse, ApplicationErrorResponse> {
        self.submit_order(account, transaction).await
    }

    #[tracing::instrument(
        name = "create_order",
        skip_all,
        fields(
            name = consts::NAME,
            connector = %account.connector,
            flow = "CreateOrder",
            order_id = %transaction.order_id,
            response.status_code = tracing::field::Empty,
            message_ = "Golden Log Line (incoming)",
        )
    )]
    async fn submit_order(
        &self,
        account: &GatewayAccount,
        transaction: &Transaction,
    ) -> CustomResult<GatewayResponse, ApplicationErrorResponse> {
        let connector_data = ConnectorData::get_connector_by_name(&account.connector);
        let order = self.resolve_order(&transaction.order_id).await?;

        let params = self.config.connectors.get(account.connector);
        if !connector_data.connector.available_for_use(order.total, params) {
            return Err(report!(ConnectorError::NotSupported {
                message: format!("order total {:.2}", order.total.0),
                connector: connector_data.connector.id(),
            }))
            .switch();
        }

        let billing_address = order.get_billing_address().switch()?.clone();
        let amount = FloatMajorUnitForConnector
            .convert_back(order.total, order.currency)
            .change_context(ConnectorError::AmountConversionFailed)
            .switch()?;

        let request_data = PaymentCreateOrderData {
            amount,
            currency: order.currency,
            email: order.email.clone(),
            billing_address,
            return_urls: self.routes.return_urls(&transaction.transaction_hash),
            order_reference: transaction.transaction_hash.clone(),
        };

        let connector_integration: BoxedConnectorIntegration<
            '_,
            PaymentCreateOrderData,
            GatewayResponse,
        > = connector_data.connector.get_connector_integration();

        let response = execute_connector_processing_step(
            &self.config.proxy,
            connector_integration,
            &self.flow_data(account),
            &request_data,
        )
        .await
        .switch()?;

        self.finish_flow(response)
    }

    /// Settle a previously submitted order. The provider disburses on its
    /// own schedule, so for current connectors this reduces to echoing the
    /// transaction back as settled without a wire call.
    #[tracing::instrument(
        name = "capture",
        skip_all,
        fields(
            name = consts::NAME,
            connector = %account.connector,
            flow = "Capture",
            order_id = %transaction.order_id,
            response.status_code = tracing::field::Empty,
            message_ = "Golden Log Line (incoming)",
        )
    )]
    pub async fn capture(
        &self,
        account: &GatewayAccount,
        transaction: &Transaction,
    ) -> CustomResult<GatewayResponse, ApplicationErrorResponse> {
        let connector_data = ConnectorData::get_connector_by_name(&account.connector);
        let request_data = self.capture_data(transaction).await?;

        let connector_integration: BoxedConnectorIntegration<
            '_,
            PaymentCaptureData,
            GatewayResponse,
        > = connector_data.connector.get_connector_integration();

        let response = execute_connector_processing_step(
            &self.config.proxy,
            connector_integration,
            &self.flow_data(account),
            &request_data,
        )
        .await
        .switch()?;

        self.finish_flow(response)
    }

    /// One provider notification, verified, decoded and written to the
    /// ledger. Unknown references and repeated deliveries are acknowledged
    /// without a write so the provider stops retrying; a bad signature is
    /// an error before any state is touched.
    #[tracing::instrument(
        name = "incoming_webhook",
        skip_all,
        fields(
            name = consts::NAME,
            connector = %account.connector,
            flow = "IncomingWebhook",
            order_reference = tracing::field::Empty,
            event_code = tracing::field::Empty,
            message_ = "Golden Log Line (incoming)",
        )
    )]
    pub async fn process_webhook(
        &self,
        account: &GatewayAccount,
        request: RequestDetails,
    ) -> CustomResult<WebhookAcknowledgement, ApplicationErrorResponse> {
        let connector_data = ConnectorData::get_connector_by_name(&account.connector);
        let webhook_secrets = account.webhook_secrets();

        let verified = connector_data
            .connector
            .verify_webhook_source(&request, webhook_secrets.as_ref(), Some(&account.auth))
            .switch()?;
        if !verified {
            return Err(report!(ConnectorError::WebhookSourceVerificationFailed)).switch();
        }

        let details = connector_data
            .connector
            .process_payment_webhook(request, webhook_secrets, Some(account.auth.clone()))
            .switch()?;

        let span = tracing::Span::current();
        span.record(
            "order_reference",
            tracing::field::display(&details.order_reference),
        );
        span.record("event_code", tracing::field::display(&details.event_code));

        let Some(parent) = self
            .transactions
            .find_by_hash(&details.order_reference)
            .await
            .switch()?
        else {
            tracing::warn!(
                order_reference = %details.order_reference,
                "no transaction matches the webhook reference, acknowledging without a write"
            );
            return Ok(WebhookAcknowledgement::default());
        };

        if self
            .transactions
            .has_successful_child(&parent.transaction_hash)
            .await
            .switch()?
        {
            tracing::warn!(
                order_reference = %parent.transaction_hash,
                "a successful child entry already exists, acknowledging duplicate delivery"
            );
            return Ok(WebhookAcknowledgement::default());
        }

        let order = self.resolve_order(&parent.order_id).await?;
        if !order.completed {
            self.orders.mark_completed(&order.order_id).await.switch()?;
        }

        let mut child = self.transactions.create_child(&parent).await.switch()?;
        child.status = details.status;
        child.code = Some(details.event_code.clone());
        child.message = details
            .event_message
            .as_deref()
            .map(|message| self.localize(&account.locale, message));
        child.reference = details.order_token.clone();
        child.payload = Some(details.raw_payload.clone());
        self.transactions.save(&child).await.switch()?;

        tracing::info!(
            status = ?child.status,
            event_code = %details.event_code,
            "webhook recorded"
        );
        Ok(WebhookAcknowledgement::default())
    }

    /// Refunds are not offered by the current connectors; the call is kept
    /// so hosts get a typed rejection instead of a missing method.
    pub async fn refund(
        &self,
        account: &GatewayAccount,
        transaction: &Transaction,
    ) -> CustomResult<GatewayResponse, ApplicationErrorResponse> {
        let connector_data = ConnectorData::get_connector_by_name(&account.connector);
        let request_data = self.capture_data(transaction).await?;
        connector_data
            .connector
            .refund(&self.flow_data(account), &request_data)
            .switch()
    }

    pub fn complete_authorize(
        &self,
        account: &GatewayAccount,
        request: &RequestDetails,
    ) -> CustomResult<GatewayResponse, ApplicationErrorResponse> {
        ConnectorData::get_connector_by_name(&account.connector)
            .connector
            .complete_authorize(&self.flow_data(account), request)
            .switch()
    }

    pub fn complete_purchase(
        &self,
        account: &GatewayAccount,
        request: &RequestDetails,
    ) -> CustomResult<GatewayResponse, ApplicationErrorResponse> {
        ConnectorData::get_connector_by_name(&account.connector)
            .connector
            .complete_purchase(&self.flow_data(account), request)
            .switch()
    }

    pub fn create_payment_source(
        &self,
        account: &GatewayAccount,
        source: &SecretSerdeValue,
    ) -> CustomResult<GatewayResponse, ApplicationErrorResponse> {
        ConnectorData::get_connector_by_name(&account.connector)
            .connector
            .create_payment_source(&self.flow_data(account), source)
            .switch()
    }

    pub fn delete_payment_source(
        &self,
        account: &GatewayAccount,
        token: &Secret<String>,
    ) -> CustomResult<GatewayResponse, ApplicationErrorResponse> {
        ConnectorData::get_connector_by_name(&account.connector)
            .connector
            .delete_payment_source(&self.flow_data(account), token)
            .switch()
    }

    /// Whether the account's connector will finance an order of this
    /// total, per its configured or built-in limits. Hosts call this to
    /// hide the gateway from checkouts it would reject.
    pub fn available_for_order(&self, account: &GatewayAccount, total: FloatMajorUnit) -> bool {
        let connector_data = ConnectorData::get_connector_by_name(&account.connector);
        let params = self.config.connectors.get(account.connector);
        connector_data.connector.available_for_use(total, params)
    }

    pub fn supports(&self, account: &GatewayAccount, capability: Capability) -> bool {
        ConnectorData::get_connector_by_name(&account.connector)
            .connector
            .supports(capability)
    }

    fn flow_data(&self, account: &GatewayAccount) -> PaymentFlowData {
        PaymentFlowData {
            connectors: self.config.connectors.clone(),
            auth: account.auth.clone(),
            test_mode: account.test_mode,
        }
    }

    async fn resolve_order(
        &self,
        order_id: &str,
    ) -> CustomResult<Order, ApplicationErrorResponse> {
        self.orders
            .get_order(order_id)
            .await
            .and_then(|order| {
                order.ok_or_else(|| {
                    report!(PlatformError::OrderNotFound {
                        order_id: order_id.to_string(),
                    })
                })
            })
            .switch()
    }

    async fn capture_data(
        &self,
        transaction: &Transaction,
    ) -> CustomResult<PaymentCaptureData, ApplicationErrorResponse> {
        let order = self.resolve_order(&transaction.order_id).await?;
        let amount = FloatMajorUnitForConnector
            .convert_back(order.total, order.currency)
            .change_context(ConnectorError::AmountConversionFailed)
            .switch()?;
        Ok(PaymentCaptureData {
            transaction_hash: transaction.transaction_hash.clone(),
            amount,
            currency: order.currency,
        })
    }

    /// A provider-rejected call becomes an application error so the host
    /// fails the checkout; anything the provider accepted flows back as
    /// the response, `success` flag included.
    fn finish_flow(
        &self,
        response: Result<GatewayResponse, ErrorResponse>,
    ) -> CustomResult<GatewayResponse, ApplicationErrorResponse> {
        match response {
            Ok(gateway_response) => {
                tracing::Span::current().record(
                    "response.status_code",
                    tracing::field::display(gateway_response.status_code),
                );
                Ok(gateway_response)
            }
            Err(error_response) => {
                tracing::Span::current().record(
                    "response.status_code",
                    tracing::field::display(error_response.status_code),
                );
                Err(report!(ApplicationErrorResponse::Unprocessable(ApiError {
                    sub_code: "PAYMENT_REJECTED".to_string(),
                    error_identifier: error_response.status_code,
                    error_message: error_response.message.clone(),
                    error_object: error_response.reason.map(serde_json::Value::String),
                })))
            }
        }
    }

    fn localize(&self, locale: &str, key: &str) -> String {
        self.messages
            .translate(locale, key)
            .unwrap_or_else(|| key.to_string())
    }
}
