#[cfg(test)]
#[allow(clippy::unwrap_used)]
#[allow(clippy::expect_used)]
#[allow(clippy::panic)]
#[allow(clippy::indexing_slicing)]
mod tests {
    pub mod create_order {
        use common_enums::Currency;
        use common_utils::{pii::Email, request::Method, types::MinorUnit};
        use domain_types::{
            connector_types::{
                ConnectorEnum, GatewayResponse, PaymentCreateOrderData, PaymentFlowData,
                ReturnUrls,
            },
            errors::ConnectorError,
            router_data::ConnectorAuthType,
            router_response_types::Response,
            transaction::BillingAddress,
            types::{ConnectorParams, Connectors},
        };
        use hyperswitch_masking::{Mask, PeekInterface, Secret};
        use interfaces::{
            connector_integration::{BoxedConnectorIntegration, ConnectorIntegrationAny},
            connector_types::BoxedConnector,
        };

        use crate::{connectors::Soisy, types::ConnectorData};

        fn flow_data() -> PaymentFlowData {
            PaymentFlowData {
                connectors: Connectors {
                    soisy: ConnectorParams::default(),
                },
                auth: ConnectorAuthType::SignatureKey {
                    api_key: Secret::new("test_auth_token".to_string()),
                    key1: Secret::new("shop_1".to_string()),
                    api_secret: Secret::new("wh_secret".to_string()),
                },
                test_mode: false,
            }
        }

        fn order_data() -> PaymentCreateOrderData {
            PaymentCreateOrderData {
                amount: MinorUnit::new(50000),
                currency: Currency::EUR,
                email: Email::try_from("buyer@example.com".to_string()).unwrap(),
                billing_address: BillingAddress {
                    first_name: Some(Secret::new("Mario".to_string())),
                    last_name: Some(Secret::new("Rossi".to_string())),
                    line1: Some(Secret::new("Via Roma 1".to_string())),
                    city: Some("Modena".to_string()),
                    zip: Some(Secret::new("41121".to_string())),
                },
                return_urls: ReturnUrls {
                    success_url: "https://shop.example.com/checkout/success".to_string(),
                    error_url: "https://shop.example.com/checkout/cancel".to_string(),
                    callback_url: "https://shop.example.com/webhooks/soisy".to_string(),
                },
                order_reference: "txn_hash_123".to_string(),
            }
        }

        fn integration(
        ) -> BoxedConnectorIntegration<'static, PaymentCreateOrderData, GatewayResponse> {
            Soisy::new().get_connector_integration()
        }

        #[test]
        fn test_build_request_valid() {
            let connector: BoxedConnector = Box::new(Soisy::new());
            let connector_data = ConnectorData {
                connector,
                connector_name: ConnectorEnum::Soisy,
            };

            let connector_integration: BoxedConnectorIntegration<
                '_,
                PaymentCreateOrderData,
                GatewayResponse,
            > = connector_data.connector.get_connector_integration();

            let request = connector_integration
                .build_request(&flow_data(), &order_data())
                .unwrap()
                .unwrap();

            assert_eq!(request.method, Method::Post);
            assert_eq!(request.url, "https://api.soisy.it/api/shops/shop_1/orders");
            assert!(request.headers.contains(&(
                "X-Auth-Token".to_string(),
                "test_auth_token".to_string().into_masked()
            )));

            let body: serde_json::Value =
                serde_json::from_str(request.body.unwrap().get_inner_value().peek()).unwrap();
            assert_eq!(body["amount"], 50000);
            assert_eq!(body["orderReference"], "txn_hash_123");
            assert_eq!(body["email"], "buyer@example.com");
            assert_eq!(body["firstname"], "Mario");
            assert_eq!(body["lastname"], "Rossi");
            assert_eq!(body["city"], "Modena");
            assert_eq!(body["address"], "Via Roma 1");
            assert_eq!(body["postalCode"], "41121");
            assert_eq!(body["successUrl"], "https://shop.example.com/checkout/success");
            assert_eq!(body["errorUrl"], "https://shop.example.com/checkout/cancel");
            assert_eq!(body["callbackUrl"], "https://shop.example.com/webhooks/soisy");
        }

        #[test]
        fn test_sandbox_mode_routes_to_sandbox_endpoint() {
            let mut data = flow_data();
            data.test_mode = true;

            let url = integration().get_url(&data, &order_data()).unwrap();
            assert_eq!(url, "https://api.sandbox.soisy.it/api/shops/shop_1/orders");
        }

        #[test]
        fn test_configured_base_url_overrides_default() {
            let mut data = flow_data();
            data.connectors.soisy.base_url = "https://soisy.example.test/api".to_string();

            let url = integration().get_url(&data, &order_data()).unwrap();
            assert_eq!(url, "https://soisy.example.test/api/shops/shop_1/orders");
        }

        #[test]
        fn test_build_request_missing_billing_fields() {
            let mut order = order_data();
            order.billing_address.first_name = None;

            let result = integration().build_request(&flow_data(), &order);
            assert!(result.is_err(), "Expected error for missing fields");
        }

        #[test]
        fn test_build_request_rejects_non_euro_orders() {
            let mut order = order_data();
            order.currency = Currency::USD;

            let error = integration()
                .build_request(&flow_data(), &order)
                .unwrap_err();
            assert!(matches!(
                error.current_context(),
                ConnectorError::CurrencyNotSupported { .. }
            ));
        }

        #[test]
        fn test_handle_response_merges_status_and_hash() {
            let res = Response {
                headers: None,
                response: bytes::Bytes::from_static(
                    br#"{"token":"sess_1","redirectUrl":"https://shop.soisy.it/sess_1"}"#,
                ),
                status_code: 201,
            };

            let gateway_response = integration()
                .handle_response(&flow_data(), &order_data(), res)
                .unwrap();

            assert!(gateway_response.success);
            assert_eq!(gateway_response.message, "");
            assert_eq!(gateway_response.transaction_hash, "txn_hash_123");
            assert_eq!(gateway_response.status_code, 201);
            assert_eq!(
                gateway_response.redirect_url.unwrap().as_str(),
                "https://shop.soisy.it/sess_1"
            );

            let payload = gateway_response.payload.peek();
            assert_eq!(payload["code"], 201);
            assert_eq!(payload["transactionHash"], "txn_hash_123");
            assert_eq!(payload["token"], "sess_1");
        }

        #[test]
        fn test_handle_response_keeps_provider_fields_on_collision() {
            let res = Response {
                headers: None,
                response: bytes::Bytes::from_static(r#"{"code":"SOISY-17"}"#.as_bytes()),
                status_code: 201,
            };

            let gateway_response = integration()
                .handle_response(&flow_data(), &order_data(), res)
                .unwrap();

            let payload = gateway_response.payload.peek();
            assert_eq!(payload["code"], "SOISY-17");
            assert_eq!(payload["transactionHash"], "txn_hash_123");
        }

        #[test]
        fn test_provider_declared_errors_mark_response_failed() {
            let res = Response {
                headers: None,
                response: bytes::Bytes::from_static(
                    br#"{"errors":{"amount":["Importo non valido"]}}"#,
                ),
                status_code: 200,
            };

            let gateway_response = integration()
                .handle_response(&flow_data(), &order_data(), res)
                .unwrap();

            assert!(!gateway_response.success);
            assert_eq!(gateway_response.message, "amount: Importo non valido");

            let payload = gateway_response.payload.peek();
            assert_eq!(payload["errors"]["amount"][0], "Importo non valido");
            assert_eq!(payload["code"], 200);
        }

        #[test]
        fn test_error_response_carries_provider_message_and_raw_body() {
            let body = br#"{"errors":{"email":["Email non valida"]}}"#;
            let res = Response {
                headers: None,
                response: bytes::Bytes::from_static(body),
                status_code: 400,
            };

            let error_response = integration().get_error_response(res).unwrap();

            assert_eq!(error_response.status_code, 400);
            assert_eq!(error_response.message, "email: Email non valida");
            assert_eq!(
                error_response.reason.as_deref(),
                Some(r#"{"errors":{"email":["Email non valida"]}}"#)
            );
        }
    }

    pub mod capture {
        use common_enums::Currency;
        use common_utils::types::MinorUnit;
        use domain_types::{
            connector_types::{PaymentCaptureData, PaymentFlowData},
            router_data::ConnectorAuthType,
            router_response_types::Response,
            types::{ConnectorParams, Connectors},
        };
        use hyperswitch_masking::{PeekInterface, Secret};
        use interfaces::connector_integration::ConnectorIntegration;

        use crate::connectors::Soisy;

        fn flow_data() -> PaymentFlowData {
            PaymentFlowData {
                connectors: Connectors {
                    soisy: ConnectorParams::default(),
                },
                auth: ConnectorAuthType::BodyKey {
                    api_key: Secret::new("test_auth_token".to_string()),
                    key1: Secret::new("shop_1".to_string()),
                },
                test_mode: false,
            }
        }

        fn capture_data() -> PaymentCaptureData {
            PaymentCaptureData {
                transaction_hash: "txn_hash_123".to_string(),
                amount: MinorUnit::new(50000),
                currency: Currency::EUR,
            }
        }

        #[test]
        fn test_capture_never_reaches_the_wire() {
            let request = Soisy::new()
                .build_request(&flow_data(), &capture_data())
                .unwrap();
            assert!(request.is_none());
        }

        #[test]
        fn test_capture_echoes_success() {
            let synthetic = Response {
                headers: None,
                response: bytes::Bytes::new(),
                status_code: 200,
            };

            let gateway_response = Soisy::new()
                .handle_response(&flow_data(), &capture_data(), synthetic)
                .unwrap();

            assert!(gateway_response.success);
            assert_eq!(gateway_response.transaction_hash, "txn_hash_123");
            assert_eq!(gateway_response.status_code, 200);

            let payload = gateway_response.payload.peek();
            assert_eq!(payload["success"], true);
            assert_eq!(payload["transactionHash"], "txn_hash_123");
        }
    }

    pub mod webhook {
        use std::collections::HashMap;

        use common_enums::TransactionStatus;
        use common_utils::{
            crypto::{HmacSha256, SignMessage},
            request::Method,
        };
        use domain_types::{
            connector_types::{ConnectorWebhookSecrets, RequestDetails},
            errors::ConnectorError,
        };
        use hyperswitch_masking::PeekInterface;
        use interfaces::connector_types::IncomingWebhook;

        use crate::connectors::Soisy;

        fn webhook_request(body: &[u8], signature: Option<String>) -> RequestDetails {
            let mut headers = HashMap::new();
            if let Some(signature) = signature {
                headers.insert("x-soisy-signature".to_string(), signature);
            }
            RequestDetails {
                method: Method::Post,
                uri: Some("/webhooks/soisy".to_string()),
                headers,
                body: body.to_vec(),
                query_params: None,
            }
        }

        fn secrets() -> ConnectorWebhookSecrets {
            ConnectorWebhookSecrets {
                secret: b"wh_secret".to_vec(),
                additional_secret: None,
            }
        }

        #[test]
        fn test_json_notification_is_decoded() {
            let body = serde_json::json!({
                "orderReference": "txn_hash_123",
                "eventId": "LoanWasDisbursed",
                "eventMessage": "payment%20received",
                "orderToken": "order_tok_9",
            })
            .to_string();

            let details = Soisy::new()
                .process_payment_webhook(webhook_request(body.as_bytes(), None), None, None)
                .unwrap();

            assert_eq!(details.order_reference, "txn_hash_123");
            assert_eq!(details.event_code, "LoanWasDisbursed");
            assert_eq!(details.status, Some(TransactionStatus::Success));
            assert_eq!(details.event_message.as_deref(), Some("payment received"));
            assert_eq!(details.order_token.as_deref(), Some("order_tok_9"));
            assert_eq!(details.raw_payload.peek()["eventId"], "LoanWasDisbursed");
        }

        #[test]
        fn test_form_notification_is_decoded() {
            let body = b"orderReference=txn_hash_123&eventId=LoanWasVerified\
                &eventMessage=waiting%20for%20verification&orderToken=order_tok_9";

            let details = Soisy::new()
                .process_payment_webhook(webhook_request(body, None), None, None)
                .unwrap();

            assert_eq!(details.order_reference, "txn_hash_123");
            assert_eq!(details.status, Some(TransactionStatus::Processing));
            assert_eq!(
                details.event_message.as_deref(),
                Some("waiting for verification")
            );
        }

        #[test]
        fn test_query_parameters_back_fill_an_empty_body() {
            let mut request = webhook_request(b"", None);
            request.query_params =
                Some("orderReference=txn_hash_123&eventId=LoanWasApproved".to_string());

            let details = Soisy::new()
                .process_payment_webhook(request, None, None)
                .unwrap();

            assert_eq!(details.order_reference, "txn_hash_123");
            assert_eq!(details.status, Some(TransactionStatus::Pending));
        }

        #[test]
        fn test_event_table_is_exhaustive() {
            let cases = [
                ("LoanWasApproved", Some(TransactionStatus::Pending)),
                ("RequestCompleted", Some(TransactionStatus::Pending)),
                ("LoanWasVerified", Some(TransactionStatus::Processing)),
                ("LoanWasDisbursed", Some(TransactionStatus::Success)),
                ("UserWasRejected", Some(TransactionStatus::Failed)),
                ("SomethingNew", None),
            ];

            for (event_id, expected) in cases {
                let body = serde_json::json!({
                    "orderReference": "txn_hash_123",
                    "eventId": event_id,
                })
                .to_string();

                let details = Soisy::new()
                    .process_payment_webhook(webhook_request(body.as_bytes(), None), None, None)
                    .unwrap();

                assert_eq!(details.status, expected, "event {event_id}");
                assert_eq!(details.event_code, event_id);
            }
        }

        #[test]
        fn test_missing_reference_is_reported() {
            let body = br#"{"eventId":"LoanWasApproved"}"#;

            let error = Soisy::new()
                .process_payment_webhook(webhook_request(body, None), None, None)
                .unwrap_err();

            assert!(matches!(
                error.current_context(),
                ConnectorError::WebhookReferenceIdNotFound
            ));
        }

        #[test]
        fn test_missing_event_id_is_reported() {
            let body = br#"{"orderReference":"txn_hash_123"}"#;

            let error = Soisy::new()
                .process_payment_webhook(webhook_request(body, None), None, None)
                .unwrap_err();

            assert!(matches!(
                error.current_context(),
                ConnectorError::WebhookEventTypeNotFound
            ));
        }

        #[test]
        fn test_verify_webhook_source_accepts_valid_signature() {
            let body = br#"{"orderReference":"txn_hash_123","eventId":"LoanWasDisbursed"}"#;
            let signature =
                hex::encode(HmacSha256.sign_message(b"wh_secret", body).unwrap());

            let verified = Soisy::new()
                .verify_webhook_source(
                    &webhook_request(body, Some(signature)),
                    Some(&secrets()),
                    None,
                )
                .unwrap();

            assert!(verified);
        }

        #[test]
        fn test_verify_webhook_source_rejects_tampered_body() {
            let signature = hex::encode(
                HmacSha256
                    .sign_message(b"wh_secret", br#"{"orderReference":"txn_hash_123"}"#)
                    .unwrap(),
            );

            let verified = Soisy::new()
                .verify_webhook_source(
                    &webhook_request(br#"{"orderReference":"txn_hash_999"}"#, Some(signature)),
                    Some(&secrets()),
                    None,
                )
                .unwrap();

            assert!(!verified);
        }

        #[test]
        fn test_verify_webhook_source_requires_signature_header() {
            let body = br#"{"orderReference":"txn_hash_123"}"#;

            let error = Soisy::new()
                .verify_webhook_source(&webhook_request(body, None), Some(&secrets()), None)
                .unwrap_err();

            assert!(matches!(
                error.current_context(),
                ConnectorError::WebhookSignatureNotFound
            ));
        }

        #[test]
        fn test_verify_webhook_source_requires_configured_secret() {
            let body = br#"{"orderReference":"txn_hash_123"}"#;
            let signature =
                hex::encode(HmacSha256.sign_message(b"wh_secret", body).unwrap());

            let error = Soisy::new()
                .verify_webhook_source(&webhook_request(body, Some(signature)), None, None)
                .unwrap_err();

            assert!(matches!(
                error.current_context(),
                ConnectorError::WebhookVerificationSecretNotFound
            ));
        }
    }

    pub mod availability {
        use common_enums::Capability;
        use common_utils::types::FloatMajorUnit;
        use domain_types::types::ConnectorParams;
        use interfaces::connector_types::ConnectorCapabilities;

        use crate::connectors::Soisy;

        #[test]
        fn test_order_total_bounds_are_inclusive() {
            let params = ConnectorParams::default();
            let soisy = Soisy::new();

            assert!(!soisy.available_for_use(FloatMajorUnit::new(99.0), &params));
            assert!(soisy.available_for_use(FloatMajorUnit::new(100.0), &params));
            assert!(soisy.available_for_use(FloatMajorUnit::new(15000.0), &params));
            assert!(!soisy.available_for_use(FloatMajorUnit::new(15001.0), &params));
        }

        #[test]
        fn test_configured_bounds_override_defaults() {
            let params = ConnectorParams {
                min_order_total: Some(FloatMajorUnit::new(50.0)),
                max_order_total: Some(FloatMajorUnit::new(500.0)),
                ..Default::default()
            };
            let soisy = Soisy::new();

            assert!(soisy.available_for_use(FloatMajorUnit::new(60.0), &params));
            assert!(!soisy.available_for_use(FloatMajorUnit::new(40.0), &params));
            assert!(!soisy.available_for_use(FloatMajorUnit::new(600.0), &params));
        }

        #[test]
        fn test_declared_capabilities_match_provider_features() {
            let soisy = Soisy::new();

            assert!(soisy.supports(Capability::Purchase));
            assert!(soisy.supports(Capability::Authorize));
            assert!(soisy.supports(Capability::Capture));
            assert!(soisy.supports(Capability::Webhooks));
            assert!(!soisy.supports(Capability::Refund));
            assert!(!soisy.supports(Capability::PartialRefund));
            assert!(!soisy.supports(Capability::CompleteAuthorize));
            assert!(!soisy.supports(Capability::CompletePurchase));
            assert!(!soisy.supports(Capability::PaymentSources));
        }
    }
}
