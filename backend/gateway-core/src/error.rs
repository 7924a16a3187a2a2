use domain_types::errors::{ApiError, ApplicationErrorResponse, ConnectorError};
use interfaces::platform::PlatformError;

/// Allows [error_stack::Report] to change between error contexts
/// using the dependent [ErrorSwitch] trait to define relations & mappings between traits
pub trait ReportSwitchExt<T, U> {
    /// Switch to the intended report by calling switch
    /// requires error switch to be already implemented on the error type
    fn switch(self) -> Result<T, error_stack::Report<U>>;
}

impl<T, U, V> ReportSwitchExt<T, U> for Result<T, error_stack::Report<V>>
where
    V: ErrorSwitch<U> + error_stack::Context,
    U: error_stack::Context,
{
    #[track_caller]
    fn switch(self) -> Result<T, error_stack::Report<U>> {
        match self {
            Ok(i) => Ok(i),
            Err(er) => {
                let new_c = er.current_context().switch();
                Err(er.change_context(new_c))
            }
        }
    }
}

/// Allow [error_stack::Report] to convert between error types
/// This auto-implements [ReportSwitchExt] for the corresponding errors
pub trait ErrorSwitch<T> {
    /// Get the next error type that the source error can be escalated into
    /// This does not consume the source error since we need to keep it in context
    fn switch(&self) -> T;
}

/// Allow [error_stack::Report] to convert between error types
/// This serves as an alternative to [ErrorSwitch]
pub trait ErrorSwitchFrom<T> {
    /// Convert to an error type that the source can be escalated into
    /// This does not consume the source error since we need to keep it in context
    fn switch_from(error: &T) -> Self;
}

impl<T, S> ErrorSwitch<T> for S
where
    T: ErrorSwitchFrom<Self>,
{
    fn switch(&self) -> T {
        T::switch_from(self)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Error while loading the configuration: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ErrorSwitch<ApplicationErrorResponse> for ConnectorError {
    fn switch(&self) -> ApplicationErrorResponse {
        match self {
            Self::FailedToObtainAuthType
            | Self::RequestEncodingFailed
            | Self::ParsingFailed
            | Self::ResponseDeserializationFailed
            | Self::ProcessingStepFailed(_)
            | Self::AmountConversionFailed => {
                ApplicationErrorResponse::InternalServerError(ApiError {
                    sub_code: "INTERNAL_SERVER_ERROR".to_string(),
                    error_identifier: 500,
                    error_message: self.to_string(),
                    error_object: None,
                })
            }
            Self::MissingRequiredField { .. } | Self::CurrencyNotSupported { .. } => {
                ApplicationErrorResponse::BadRequest(ApiError {
                    sub_code: "BAD_REQUEST".to_string(),
                    error_identifier: 400,
                    error_message: self.to_string(),
                    error_object: None,
                })
            }
            Self::NotSupported { .. } => ApplicationErrorResponse::NotImplemented(ApiError {
                sub_code: "NOT_IMPLEMENTED".to_string(),
                error_identifier: 501,
                error_message: self.to_string(),
                error_object: None,
            }),
            Self::WebhookBodyDecodingFailed
            | Self::WebhookSignatureNotFound
            | Self::WebhookSourceVerificationFailed
            | Self::WebhookVerificationSecretNotFound
            | Self::WebhookReferenceIdNotFound
            | Self::WebhookEventTypeNotFound => ApplicationErrorResponse::BadRequest(ApiError {
                sub_code: "INVALID_WEBHOOK_DATA".to_string(),
                error_identifier: 400,
                error_message: self.to_string(),
                error_object: None,
            }),
            Self::RequestTimeoutReceived => {
                ApplicationErrorResponse::InternalServerError(ApiError {
                    sub_code: "REQUEST_TIMEOUT".to_string(),
                    error_identifier: 504,
                    error_message: self.to_string(),
                    error_object: None,
                })
            }
        }
    }
}

impl ErrorSwitch<ApplicationErrorResponse> for PlatformError {
    fn switch(&self) -> ApplicationErrorResponse {
        match self {
            Self::StorageFailure => ApplicationErrorResponse::InternalServerError(ApiError {
                sub_code: "PLATFORM_STORAGE_ERROR".to_string(),
                error_identifier: 500,
                error_message: self.to_string(),
                error_object: None,
            }),
            Self::OrderNotFound { .. } => ApplicationErrorResponse::NotFound(ApiError {
                sub_code: "ORDER_NOT_FOUND".to_string(),
                error_identifier: 404,
                error_message: self.to_string(),
                error_object: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_operation_switches_to_not_implemented() {
        let error = ConnectorError::NotSupported {
            message: "refund".to_string(),
            connector: "soisy",
        };
        match error.switch() {
            ApplicationErrorResponse::NotImplemented(api_error) => {
                assert_eq!(api_error.error_identifier, 501);
                assert_eq!(api_error.sub_code, "NOT_IMPLEMENTED");
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn webhook_failures_switch_to_bad_request() {
        for error in [
            ConnectorError::WebhookBodyDecodingFailed,
            ConnectorError::WebhookSourceVerificationFailed,
            ConnectorError::WebhookVerificationSecretNotFound,
        ] {
            match error.switch() {
                ApplicationErrorResponse::BadRequest(api_error) => {
                    assert_eq!(api_error.sub_code, "INVALID_WEBHOOK_DATA");
                }
                other => panic!("unexpected mapping: {other:?}"),
            }
        }
    }

    #[test]
    fn upstream_timeout_carries_gateway_timeout_identifier() {
        match ConnectorError::RequestTimeoutReceived.switch() {
            ApplicationErrorResponse::InternalServerError(api_error) => {
                assert_eq!(api_error.error_identifier, 504);
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn missing_order_switches_to_not_found() {
        let error = PlatformError::OrderNotFound {
            order_id: "42".to_string(),
        };
        match error.switch() {
            ApplicationErrorResponse::NotFound(api_error) => {
                assert_eq!(api_error.error_identifier, 404);
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn report_switch_keeps_the_source_in_context() {
        let result: Result<(), error_stack::Report<ConnectorError>> =
            Err(error_stack::report!(ConnectorError::ParsingFailed));
        let switched: Result<(), error_stack::Report<ApplicationErrorResponse>> = result.switch();
        let report = switched.unwrap_err();
        assert!(report.contains::<ConnectorError>());
    }
}
