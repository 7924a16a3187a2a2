use common_utils::{consts, CustomResult};
use error_stack::ResultExt;

use crate::{errors, router_data::ErrorResponse, router_response_types::Response};

pub type Error = error_stack::Report<errors::ConnectorError>;

pub fn missing_field_err(
    message: &'static str,
) -> Box<dyn Fn() -> error_stack::Report<errors::ConnectorError> + 'static> {
    Box::new(move || {
        errors::ConnectorError::MissingRequiredField {
            field_name: message,
        }
        .into()
    })
}

/// Fallback for error bodies that are not the JSON shape the connector
/// expected. An HTML or plain-text body is preserved verbatim in `reason`;
/// a JSON body of an unknown shape keeps the deserialization error.
pub fn handle_json_response_deserialization_failure(
    res: Response,
    connector: &'static str,
) -> CustomResult<ErrorResponse, errors::ConnectorError> {
    let response_data = String::from_utf8(res.response.to_vec())
        .change_context(errors::ConnectorError::ResponseDeserializationFailed)?;

    // check for whether the response is in json format
    match serde_json::from_str::<serde_json::Value>(&response_data) {
        // in case of unexpected response but in json format
        Ok(_) => Err(errors::ConnectorError::ResponseDeserializationFailed)?,
        // in case of unexpected response but in html or string format
        Err(error) => {
            tracing::error!(connector, deserialization_error = ?error);
            Ok(ErrorResponse {
                status_code: res.status_code,
                code: consts::NO_ERROR_CODE.to_string(),
                message: consts::UNSUPPORTED_ERROR_MESSAGE.to_string(),
                reason: Some(response_data),
                connector_transaction_id: None,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn html_error_body_is_preserved_as_reason() {
        let res = Response {
            headers: None,
            response: bytes::Bytes::from_static(b"<html>502 Bad Gateway</html>"),
            status_code: 502,
        };
        let error = handle_json_response_deserialization_failure(res, "soisy").unwrap();
        assert_eq!(error.status_code, 502);
        assert_eq!(error.reason.as_deref(), Some("<html>502 Bad Gateway</html>"));
    }

    #[test]
    fn unknown_json_shape_stays_a_deserialization_error() {
        let res = Response {
            headers: None,
            response: bytes::Bytes::from_static(b"{\"unexpected\":true}"),
            status_code: 500,
        };
        let result = handle_json_response_deserialization_failure(res, "soisy");
        assert!(result.is_err());
    }
}
