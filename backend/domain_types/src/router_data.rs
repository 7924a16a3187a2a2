use common_utils::ext_traits::ValueExt;
use error_stack::ResultExt;
use hyperswitch_masking::Secret;

pub type Error = error_stack::Report<crate::errors::ConnectorError>;

/// Credential material for a connector account, as configured on the host
/// platform. The variant describes where each piece of the credential is
/// carried on the wire; the connector decides what the pieces mean.
#[derive(Default, Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(tag = "auth_type")]
pub enum ConnectorAuthType {
    HeaderKey {
        api_key: Secret<String>,
    },
    BodyKey {
        api_key: Secret<String>,
        key1: Secret<String>,
    },
    SignatureKey {
        api_key: Secret<String>,
        key1: Secret<String>,
        api_secret: Secret<String>,
    },
    #[default]
    NoKey,
}

impl ConnectorAuthType {
    pub fn from_secret_value(
        value: common_utils::pii::SecretSerdeValue,
    ) -> common_utils::errors::CustomResult<Self, common_utils::errors::ParsingError> {
        value
            .parse_value::<Self>("ConnectorAuthType")
            .change_context(common_utils::errors::ParsingError::StructParseFailure(
                "ConnectorAuthType",
            ))
    }
}

/// Error surface returned when a connector rejects a request. Built by the
/// connector's `build_error_response` from whatever the provider sent back.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub reason: Option<String>,
    pub status_code: u16,
    pub connector_transaction_id: Option<String>,
}

impl Default for ErrorResponse {
    fn default() -> Self {
        Self {
            code: "HE_00".to_string(),
            message: "Something went wrong".to_string(),
            reason: None,
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            connector_transaction_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use hyperswitch_masking::PeekInterface;

    use super::*;

    #[test]
    fn auth_type_parses_from_secret_value() {
        let value = Secret::new(serde_json::json!({
            "auth_type": "SignatureKey",
            "api_key": "token-123",
            "key1": "shop-456",
            "api_secret": "whsec-789",
        }));
        let auth = ConnectorAuthType::from_secret_value(value).unwrap();
        match auth {
            ConnectorAuthType::SignatureKey {
                api_key,
                key1,
                api_secret,
            } => {
                assert_eq!(api_key.peek(), "token-123");
                assert_eq!(key1.peek(), "shop-456");
                assert_eq!(api_secret.peek(), "whsec-789");
            }
            other => panic!("unexpected auth type: {other:?}"),
        }
    }

    #[test]
    fn error_response_defaults_to_internal_error() {
        let error = ErrorResponse::default();
        assert_eq!(error.status_code, 500);
        assert_eq!(error.code, "HE_00");
    }
}
