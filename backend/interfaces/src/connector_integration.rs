use common_utils::{
    request::{Method, Request, RequestBuilder, RequestContent},
    CustomResult, Maskable,
};
use domain_types::{
    connector_types::PaymentFlowData, errors::ConnectorError, router_response_types::Response,
    ErrorResponse,
};

use crate::api::ConnectorCommon;

pub type BoxedConnectorIntegration<'a, Req, Resp> =
    Box<&'a (dyn ConnectorIntegration<Req, Resp> + Send + Sync)>;

/// Recovers the integration for one operation from a connector trait
/// object. Blanket-implemented for every `ConnectorIntegration`; the call
/// site's expected type picks the operation.
pub trait ConnectorIntegrationAny<Req, Resp>: Send + Sync {
    fn get_connector_integration(&self) -> BoxedConnectorIntegration<'_, Req, Resp>;
}

impl<S, Req, Resp> ConnectorIntegrationAny<Req, Resp> for S
where
    S: ConnectorIntegration<Req, Resp> + Send + Sync,
{
    fn get_connector_integration(&self) -> BoxedConnectorIntegration<'_, Req, Resp> {
        Box::new(self)
    }
}

/// One connector operation: how to build the outbound request and how to
/// read what came back.
///
/// Only `handle_response` is mandatory. `build_request` assembles the
/// request from the part getters; an operation that never reaches the wire
/// returns `Ok(None)` and the caller feeds `handle_response` a synthetic
/// empty 200.
pub trait ConnectorIntegration<Req, Resp>:
    ConnectorIntegrationAny<Req, Resp> + ConnectorCommon + Sync
{
    fn get_headers(
        &self,
        _data: &PaymentFlowData,
        _req: &Req,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError> {
        Ok(vec![])
    }

    fn get_content_type(&self) -> &'static str {
        self.common_get_content_type()
    }

    fn get_http_method(&self) -> Method {
        Method::Post
    }

    fn get_url(
        &self,
        _data: &PaymentFlowData,
        _req: &Req,
    ) -> CustomResult<String, ConnectorError> {
        Ok(String::new())
    }

    fn get_request_body(
        &self,
        _data: &PaymentFlowData,
        _req: &Req,
    ) -> CustomResult<Option<RequestContent>, ConnectorError> {
        Ok(None)
    }

    fn build_request(
        &self,
        data: &PaymentFlowData,
        req: &Req,
    ) -> CustomResult<Option<Request>, ConnectorError> {
        Ok(Some(
            RequestBuilder::new()
                .method(self.get_http_method())
                .url(&self.get_url(data, req)?)
                .attach_default_headers()
                .headers(self.get_headers(data, req)?)
                .set_optional_body(self.get_request_body(data, req)?)
                .build(),
        ))
    }

    fn handle_response(
        &self,
        data: &PaymentFlowData,
        req: &Req,
        res: Response,
    ) -> CustomResult<Resp, ConnectorError>;

    fn get_error_response(&self, res: Response) -> CustomResult<ErrorResponse, ConnectorError> {
        self.build_error_response(res)
    }
}
