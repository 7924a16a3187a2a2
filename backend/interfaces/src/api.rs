use common_utils::{CustomResult, Maskable};
use domain_types::{
    errors::ConnectorError, router_data::ConnectorAuthType, router_response_types::Response,
    types::Connectors, ErrorResponse,
};

/// Properties every connector exposes regardless of which operations it
/// supports.
pub trait ConnectorCommon {
    /// Name of the connector, used in logs and error messages.
    fn id(&self) -> &'static str;

    /// Content type sent with request bodies unless an operation overrides
    /// it.
    fn common_get_content_type(&self) -> &'static str {
        "application/json"
    }

    /// API origin for this connector. `test_mode` selects the sandbox
    /// environment when the account is configured for it.
    fn base_url<'a>(&self, connectors: &'a Connectors, test_mode: bool) -> &'a str;

    /// Headers carrying the account credentials.
    fn get_auth_header(
        &self,
        auth_type: &ConnectorAuthType,
    ) -> CustomResult<Vec<(String, Maskable<String>)>, ConnectorError>;

    /// Interpret a non-2xx response body into the normalized error
    /// surface.
    fn build_error_response(&self, res: Response) -> CustomResult<ErrorResponse, ConnectorError> {
        Ok(ErrorResponse {
            status_code: res.status_code,
            ..ErrorResponse::default()
        })
    }
}
