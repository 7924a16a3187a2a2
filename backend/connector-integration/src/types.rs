use domain_types::connector_types::ConnectorEnum;
use interfaces::connector_types::BoxedConnector;

use crate::connectors;

#[derive(Clone)]
pub struct ConnectorData {
    pub connector: BoxedConnector,
    pub connector_name: ConnectorEnum,
}

impl ConnectorData {
    pub fn get_connector_by_name(connector_name: &ConnectorEnum) -> Self {
        let connector = Self::convert_connector(*connector_name);
        Self {
            connector,
            connector_name: *connector_name,
        }
    }

    fn convert_connector(connector_name: ConnectorEnum) -> BoxedConnector {
        match connector_name {
            ConnectorEnum::Soisy => Box::new(connectors::Soisy::new()),
        }
    }
}

/// Provider response paired with the correlation id and transport status
/// it arrived with, ready for normalization.
pub struct ResponseRouterData<Response> {
    pub response: Response,
    pub order_reference: String,
    pub http_code: u16,
}
