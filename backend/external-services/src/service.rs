use std::{str::FromStr, time::Duration};

use common_utils::{
    consts::REQUEST_TIMEOUT_SECS,
    request::{Headers, Method, Request, RequestContent},
};
use domain_types::{
    connector_types::PaymentFlowData,
    errors::{ApiClientError, ConnectorError},
    router_data::ErrorResponse,
    router_response_types::Response,
    types::Proxy,
};
use error_stack::{report, ResultExt};
use hyperswitch_masking::{ErasedMaskSerialize, Maskable};
use interfaces::connector_integration::BoxedConnectorIntegration;
use once_cell::sync::OnceCell;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::field::Empty;

pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Runs one connector operation end to end: build the request, send it,
/// hand whatever came back to the connector for interpretation.
///
/// The inner `Result` carries the provider's verdict: `Ok` with the
/// handled response for an accepted call, `Err` with the normalized error
/// surface when the provider rejected it. The outer result is reserved for
/// failures of the step itself, transport included.
///
/// Operations whose `build_request` returns `None` never reach the wire;
/// the connector's `handle_response` is fed a synthetic empty 200 so it
/// can synthesize the local outcome.
#[tracing::instrument(
    name = "execute_connector_processing_step",
    skip_all,
    fields(
        request.headers = Empty,
        request.body = Empty,
        request.url = Empty,
        request.method = Empty,
        response.body = Empty,
        response.headers = Empty,
        response.error_message = Empty,
        response.status_code = Empty,
        message_ = "Golden Log Line (outgoing)",
        latency = Empty,
    )
)]
pub async fn execute_connector_processing_step<Req, Resp>(
    proxy: &Proxy,
    connector: BoxedConnectorIntegration<'_, Req, Resp>,
    flow_data: &PaymentFlowData,
    req: &Req,
) -> CustomResult<Result<Resp, ErrorResponse>, ConnectorError>
where
    Req: std::fmt::Debug,
    Resp: std::fmt::Debug,
{
    let start = tokio::time::Instant::now();
    let connector_request = connector.build_request(flow_data, req)?;

    let original_headers = connector_request
        .as_ref()
        .map(|connector_request| connector_request.headers.clone())
        .unwrap_or_default();

    let masked_headers = original_headers
        .iter()
        .fold(serde_json::Map::new(), |mut acc, (k, v)| {
            let value = match v {
                Maskable::Masked(_) => {
                    serde_json::Value::String("*** alloc::string::String ***".to_string())
                }
                Maskable::Normal(iv) => serde_json::Value::String(iv.to_owned()),
            };
            acc.insert(k.clone(), value);
            acc
        });
    let headers_for_logging = serde_json::Value::Object(masked_headers);
    tracing::Span::current().record(
        "request.headers",
        tracing::field::display(&headers_for_logging),
    );

    if let Some(connector_request) = connector_request.as_ref() {
        let masked_request = match connector_request.body.as_ref() {
            Some(RequestContent::Json(i)) | Some(RequestContent::FormUrlEncoded(i)) => (**i)
                .masked_serialize()
                .unwrap_or(json!({ "error": "failed to mask serialize connector request"})),
            Some(RequestContent::RawBytes(_)) => json!({"request_type": "RAW_BYTES"}),
            None => serde_json::Value::Null,
        };
        tracing::Span::current().record("request.body", tracing::field::display(&masked_request));
    }

    let result = match connector_request {
        Some(request) => {
            tracing::Span::current().record("request.url", tracing::field::display(&request.url));
            tracing::Span::current()
                .record("request.method", tracing::field::display(request.method));

            let response = call_connector_api(proxy, request, connector.id())
                .await
                .map_err(|error| {
                    if error.current_context().is_upstream_timeout() {
                        error.change_context(ConnectorError::RequestTimeoutReceived)
                    } else {
                        error.change_context(ConnectorError::ProcessingStepFailed(None))
                    }
                });

            match response {
                Ok(Ok(body)) => {
                    tracing::Span::current()
                        .record("response.status_code", tracing::field::display(body.status_code));
                    if let Ok(response_value) = parse_json_with_bom_handling(&body.response) {
                        let headers = body.headers.clone().unwrap_or_default();
                        let map =
                            headers
                                .iter()
                                .fold(serde_json::Map::new(), |mut acc, (left, right)| {
                                    let header_value = if right.is_sensitive() {
                                        serde_json::Value::String(
                                            "*** alloc::string::String ***".to_string(),
                                        )
                                    } else if let Ok(x) = right.to_str() {
                                        serde_json::Value::String(x.to_string())
                                    } else {
                                        return acc;
                                    };
                                    acc.insert(left.as_str().to_string(), header_value);
                                    acc
                                });
                        tracing::Span::current().record(
                            "response.headers",
                            tracing::field::display(serde_json::Value::Object(map)),
                        );
                        tracing::Span::current().record(
                            "response.body",
                            tracing::field::display(response_value.masked_serialize().unwrap_or(
                                json!({ "error": "failed to mask serialize connector response"}),
                            )),
                        );
                    }
                    Ok(Ok(connector.handle_response(flow_data, req, body)?))
                }
                Ok(Err(body)) => {
                    let error = connector.get_error_response(body)?;
                    tracing::Span::current().record(
                        "response.error_message",
                        tracing::field::display(&error.message),
                    );
                    tracing::Span::current().record(
                        "response.status_code",
                        tracing::field::display(error.status_code),
                    );
                    Ok(Err(error))
                }
                Err(err) => Err(err),
            }
        }
        None => {
            // No wire call for this operation; the connector interprets
            // an empty success.
            let synthetic = Response {
                headers: None,
                response: bytes::Bytes::new(),
                status_code: 200,
            };
            Ok(Ok(connector.handle_response(flow_data, req, synthetic)?))
        }
    };

    let elapsed = start.elapsed().as_millis();
    tracing::Span::current().record("latency", elapsed);
    tracing::info!(tag = ?Tag::OutgoingApi, log_type = "api", "Outgoing Request completed");
    result
}

pub async fn call_connector_api(
    proxy: &Proxy,
    request: Request,
    _flow_name: &str,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    let url =
        reqwest::Url::parse(&request.url).change_context(ApiClientError::UrlEncodingFailed)?;

    let should_bypass_proxy = proxy.bypass_proxy_urls.contains(&url.to_string());

    let client = create_client(proxy, should_bypass_proxy)?;

    let headers = request.headers.construct_header_map()?;

    let request = {
        match request.method {
            Method::Get => client.get(url),
            Method::Post => {
                let client = client.post(url);
                match request.body {
                    Some(RequestContent::Json(payload)) => client.json(&payload),
                    Some(RequestContent::FormUrlEncoded(payload)) => client.form(&payload),
                    Some(RequestContent::RawBytes(payload)) => client.body(payload),
                    None => client,
                }
            }
            _ => client.post(url),
        }
        .add_headers(headers)
    };

    let send_request = async {
        request.send().await.map_err(|error| {
            let api_error = match error {
                error if error.is_timeout() => ApiClientError::RequestTimeoutReceived,
                _ => ApiClientError::RequestNotSent(error.to_string()),
            };
            info_log(
                "REQUEST_FAILURE",
                &json!("Unable to send request to connector."),
            );
            report!(api_error)
        })
    };

    let response = send_request.await;

    handle_response(response).await
}

pub fn create_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    get_base_client(proxy_config, should_bypass_proxy)
}

static NON_PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();
static PROXIED_CLIENT: OnceCell<Client> = OnceCell::new();

fn get_base_client(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<Client, ApiClientError> {
    Ok(if should_bypass_proxy
        || (proxy_config.http_url.is_none() && proxy_config.https_url.is_none())
    {
        &NON_PROXIED_CLIENT
    } else {
        &PROXIED_CLIENT
    }
    .get_or_try_init(|| {
        get_client_builder(proxy_config, should_bypass_proxy)?
            .build()
            .change_context(ApiClientError::ClientConstructionFailed)
            .inspect_err(|err| {
                info_log(
                    "ERROR",
                    &json!(format!("Failed to construct base client. Error: {:?}", err)),
                );
            })
    })?
    .clone())
}

fn get_client_builder(
    proxy_config: &Proxy,
    should_bypass_proxy: bool,
) -> CustomResult<reqwest::ClientBuilder, ApiClientError> {
    let mut client_builder = Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .pool_idle_timeout(Duration::from_secs(
            proxy_config
                .idle_pool_connection_timeout
                .unwrap_or_default(),
        ));

    if should_bypass_proxy {
        return Ok(client_builder);
    }

    // Proxy all HTTPS traffic through the configured HTTPS proxy
    if let Some(url) = proxy_config.https_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::https(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTPS proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    // Proxy all HTTP traffic through the configured HTTP proxy
    if let Some(url) = proxy_config.http_url.as_ref() {
        client_builder = client_builder.proxy(
            reqwest::Proxy::http(url)
                .change_context(ApiClientError::InvalidProxyConfiguration)
                .inspect_err(|err| {
                    info_log(
                        "PROXY_ERROR",
                        &json!(format!("HTTP proxy configuration error. Error: {:?}", err)),
                    );
                })?,
        );
    }

    Ok(client_builder)
}

async fn handle_response(
    response: CustomResult<reqwest::Response, ApiClientError>,
) -> CustomResult<Result<Response, Response>, ApiClientError> {
    match response {
        Ok(resp) => {
            let status_code = resp.status().as_u16();
            let headers = Some(resp.headers().to_owned());
            match status_code {
                200..=202 | 302 | 204 => {
                    let response = resp
                        .bytes()
                        .await
                        .change_context(ApiClientError::ResponseDecodingFailed)?;
                    Ok(Ok(Response {
                        headers,
                        response,
                        status_code,
                    }))
                }
                500..=599 => {
                    let bytes = resp.bytes().await.map_err(|error| {
                        report!(error).change_context(ApiClientError::ResponseDecodingFailed)
                    })?;

                    Ok(Err(Response {
                        headers,
                        response: bytes,
                        status_code,
                    }))
                }

                400..=499 => {
                    let bytes = resp.bytes().await.map_err(|error| {
                        report!(error).change_context(ApiClientError::ResponseDecodingFailed)
                    })?;

                    Ok(Err(Response {
                        headers,
                        response: bytes,
                        status_code,
                    }))
                }
                _ => {
                    info_log(
                        "UNEXPECTED_RESPONSE",
                        &json!("Unexpected response from server."),
                    );
                    Err(report!(ApiClientError::UnexpectedServerResponse))
                }
            }
        }
        Err(error) => Err(error),
    }
}

/// Helper function to parse JSON from response bytes with BOM handling
pub fn parse_json_with_bom_handling(
    response_bytes: &[u8],
) -> Result<serde_json::Value, serde_json::Error> {
    // Try direct parsing first (most common case)
    match serde_json::from_slice::<serde_json::Value>(response_bytes) {
        Ok(value) => Ok(value),
        Err(_) => {
            // If direct parsing fails, try after removing BOM
            let cleaned_response = if response_bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
                // UTF-8 BOM detected, remove it
                &response_bytes[3..]
            } else {
                response_bytes
            };
            serde_json::from_slice::<serde_json::Value>(cleaned_response)
        }
    }
}

pub(super) trait HeaderExt {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError>;
}

impl HeaderExt for Headers {
    fn construct_header_map(self) -> CustomResult<reqwest::header::HeaderMap, ApiClientError> {
        use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

        self.into_iter().try_fold(
            HeaderMap::new(),
            |mut header_map, (header_name, header_value)| {
                let header_name = HeaderName::from_str(&header_name)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                let header_value = header_value.into_inner();
                let header_value = HeaderValue::from_str(&header_value)
                    .change_context(ApiClientError::HeaderMapConstructionFailed)?;
                header_map.append(header_name, header_value);
                Ok(header_map)
            },
        )
    }
}

pub(super) trait RequestBuilderExt {
    fn add_headers(self, headers: reqwest::header::HeaderMap) -> Self;
}

impl RequestBuilderExt for reqwest::RequestBuilder {
    fn add_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self = self.headers(headers);
        self
    }
}

#[derive(Debug, Default, serde::Deserialize, Clone, strum::EnumString)]
pub enum Tag {
    /// General.
    #[default]
    General,
    /// API: incoming web request.
    ApiIncomingRequest,
    /// Call initiated to connector.
    InitiatedToConnector,
    /// Incoming response
    IncomingApi,
    /// Api Outgoing Request
    OutgoingApi,
}

#[inline]
pub fn debug_log(action: &str, message: &Value) {
    tracing::debug!(tags = %action, json_value= %message);
}

#[inline]
pub fn info_log(action: &str, message: &Value) {
    tracing::info!(tags = %action, json_value= %message);
}

#[inline]
pub fn error_log(action: &str, message: &Value) {
    tracing::error!(tags = %action, json_value= %message);
}

#[inline]
pub fn warn_log(action: &str, message: &Value) {
    tracing::warn!(tags = %action, json_value= %message);
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn header_map_construction_rejects_invalid_names() {
        let mut headers = Headers::new();
        headers.insert(("bad header\n".to_string(), Maskable::Normal("v".to_string())));
        assert!(headers.construct_header_map().is_err());
    }

    #[test]
    fn header_map_construction_keeps_masked_values() {
        let mut headers = Headers::new();
        headers.insert((
            "X-Auth-Token".to_string(),
            Maskable::Masked("secret-token".to_string().into()),
        ));
        let map = headers.construct_header_map().unwrap();
        assert_eq!(map.get("X-Auth-Token").unwrap(), "secret-token");
    }

    #[test]
    fn bom_prefixed_json_still_parses() {
        let mut body = vec![0xEF, 0xBB, 0xBF];
        body.extend_from_slice(b"{\"token\":\"abc\"}");
        let value = parse_json_with_bom_handling(&body).unwrap();
        assert_eq!(value["token"], "abc");
    }
}
