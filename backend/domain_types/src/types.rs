use common_utils::types::FloatMajorUnit;
use serde::{Deserialize, Serialize};

use crate::connector_types::ConnectorEnum;

/// Per-connector endpoint and limit configuration, one entry per supported
/// connector. Loaded from the `[connectors]` table of the config file.
#[derive(Clone, serde::Deserialize, serde::Serialize, Debug, Default, PartialEq)]
pub struct Connectors {
    pub soisy: ConnectorParams,
}

impl Connectors {
    pub fn get(&self, connector: ConnectorEnum) -> &ConnectorParams {
        match connector {
            ConnectorEnum::Soisy => &self.soisy,
        }
    }
}

/// Endpoints and order-amount limits for one connector. Empty or missing
/// values fall back to the connector's built-in defaults.
#[derive(Clone, serde::Deserialize, serde::Serialize, Debug, Default, PartialEq)]
pub struct ConnectorParams {
    /// base url
    #[serde(default)]
    pub base_url: String,
    /// base url used when the account runs in sandbox mode
    #[serde(default)]
    pub sandbox_base_url: Option<String>,
    /// smallest order total the connector accepts, in major units
    #[serde(default)]
    pub min_order_total: Option<FloatMajorUnit>,
    /// largest order total the connector accepts, in major units
    #[serde(default)]
    pub max_order_total: Option<FloatMajorUnit>,
}

impl ConnectorParams {
    pub fn new(base_url: String, sandbox_base_url: Option<String>) -> Self {
        Self {
            base_url,
            sandbox_base_url,
            min_order_total: None,
            max_order_total: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq, Hash, Default)]
pub struct Proxy {
    pub http_url: Option<String>,
    pub https_url: Option<String>,
    pub idle_pool_connection_timeout: Option<u64>,
    #[serde(default)]
    pub bypass_proxy_urls: Vec<String>,
}

impl Proxy {
    /// Key under which a client built for this proxy setup may be cached.
    /// `None` means the plain non-proxied client is fine.
    pub fn cache_key(&self, should_bypass_proxy: bool) -> Option<Self> {
        if should_bypass_proxy || (self.http_url.is_none() && self.https_url.is_none()) {
            None
        } else {
            Some(self.clone())
        }
    }
}
