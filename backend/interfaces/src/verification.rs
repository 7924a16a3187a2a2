use common_utils::{crypto, CustomResult};
use domain_types::errors::ConnectorError;

/// Core trait for source verification
///
/// Names the signature scheme a connector's notifications are signed
/// with. The default is no verification at all; a connector that signs
/// its webhooks overrides `get_algorithm` and the webhook trait's
/// signature and message getters do the rest.
pub trait SourceVerification {
    /// Get the verification algorithm being used
    fn get_algorithm(
        &self,
    ) -> CustomResult<Box<dyn crypto::VerifySignature + Send>, ConnectorError> {
        Ok(Box::new(crypto::NoAlgorithm))
    }
}
