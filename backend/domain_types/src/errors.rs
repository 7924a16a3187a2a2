pub use common_utils::errors::ParsingError;

/// Error body attached to every [`ApplicationErrorResponse`] variant.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ApiError {
    pub sub_code: String,
    pub error_identifier: u16,
    pub error_message: String,
    pub error_object: Option<serde_json::Value>,
}

/// Application-facing error returned by the gateway flows to the host
/// platform. Connector and client failures are switched into one of these
/// before they cross the crate boundary.
#[derive(Debug, Clone, PartialEq, serde::Serialize, thiserror::Error)]
pub enum ApplicationErrorResponse {
    #[error("Unauthorized: {0:?}")]
    Unauthorized(ApiError),
    #[error("BadRequest: {0:?}")]
    BadRequest(ApiError),
    #[error("NotFound: {0:?}")]
    NotFound(ApiError),
    #[error("Unprocessable: {0:?}")]
    Unprocessable(ApiError),
    #[error("InternalServerError: {0:?}")]
    InternalServerError(ApiError),
    #[error("NotImplemented: {0:?}")]
    NotImplemented(ApiError),
}

/// Errors raised while building requests for, or interpreting responses
/// from, a payment connector.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConnectorError {
    #[error("Failed to obtain authentication type")]
    FailedToObtainAuthType,
    #[error("Failed to encode connector request")]
    RequestEncodingFailed,
    #[error("Parsing failed")]
    ParsingFailed,
    #[error("Failed to deserialize connector response")]
    ResponseDeserializationFailed,
    #[error("Failed to execute a processing step: {0:?}")]
    ProcessingStepFailed(Option<bytes::Bytes>),
    #[error("Connector request timed out")]
    RequestTimeoutReceived,
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },
    #[error("{message} is not supported by {connector}")]
    NotSupported {
        message: String,
        connector: &'static str,
    },
    #[error("{message} is not supported by {connector}")]
    CurrencyNotSupported {
        message: String,
        connector: &'static str,
    },
    #[error("Failed to convert amount to required type")]
    AmountConversionFailed,
    #[error("Failed to decode webhook body")]
    WebhookBodyDecodingFailed,
    #[error("Webhook signature not found")]
    WebhookSignatureNotFound,
    #[error("Webhook source verification failed")]
    WebhookSourceVerificationFailed,
    #[error("Webhook verification secret not found")]
    WebhookVerificationSecretNotFound,
    #[error("Webhook reference id not found")]
    WebhookReferenceIdNotFound,
    #[error("Webhook event type not found")]
    WebhookEventTypeNotFound,
}

/// Errors raised by the outbound HTTP client while talking to a connector.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ApiClientError {
    #[error("Header map construction failed")]
    HeaderMapConstructionFailed,
    #[error("Invalid proxy configuration")]
    InvalidProxyConfiguration,
    #[error("Client construction failed")]
    ClientConstructionFailed,
    #[error("URL encoding of request payload failed")]
    UrlEncodingFailed,
    #[error("Failed to send request to connector {0}")]
    RequestNotSent(String),
    #[error("Failed to decode response")]
    ResponseDecodingFailed,
    #[error("Server responded with Request Timeout")]
    RequestTimeoutReceived,
    #[error("Server responded with unexpected response")]
    UnexpectedServerResponse,
}

impl ApiClientError {
    pub fn is_upstream_timeout(&self) -> bool {
        self == &Self::RequestTimeoutReceived
    }
}
