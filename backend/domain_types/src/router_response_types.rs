/// Raw HTTP response captured from a connector call, before the connector's
/// response handler interprets it.
#[derive(Clone, Debug)]
pub struct Response {
    pub headers: Option<http::HeaderMap>,
    pub response: bytes::Bytes,
    pub status_code: u16,
}
