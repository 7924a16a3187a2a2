//! Host platform services the gateway core depends on.
//!
//! The platform owns orders and the transaction ledger; the gateway only
//! reads and appends through these ports. Implementations live with the
//! host integration, not in this workspace.

use common_utils::errors::CustomResult;
use domain_types::{
    connector_types::ReturnUrls,
    transaction::{Order, Transaction},
};

/// Errors that may occur inside the host platform while serving a port
/// call.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The underlying transaction store failed to read or write.
    #[error("Transaction store operation failed")]
    StorageFailure,
    /// The order a transaction points at does not exist.
    #[error("Order not found: {order_id}")]
    OrderNotFound { order_id: String },
}

/// Append-only access to the host's transaction ledger.
///
/// `create_child` mints the new entry (the host owns hash generation);
/// the caller fills in status and event details before `save`.
#[async_trait::async_trait]
pub trait TransactionStore: Send + Sync {
    /// Look up a transaction by its hash. Unknown hashes are not an
    /// error.
    async fn find_by_hash(
        &self,
        transaction_hash: &str,
    ) -> CustomResult<Option<Transaction>, PlatformError>;

    /// Whether any child of `parent_hash` already recorded a successful
    /// outcome.
    async fn has_successful_child(
        &self,
        parent_hash: &str,
    ) -> CustomResult<bool, PlatformError>;

    /// Mint a new child entry under `parent`, unsaved.
    async fn create_child(&self, parent: &Transaction)
        -> CustomResult<Transaction, PlatformError>;

    async fn save(&self, transaction: &Transaction) -> CustomResult<(), PlatformError>;
}

/// Read and complete host orders.
#[async_trait::async_trait]
pub trait OrderAccess: Send + Sync {
    async fn get_order(&self, order_id: &str) -> CustomResult<Option<Order>, PlatformError>;

    /// Flip the order's completion flag. Idempotent on the host side.
    async fn mark_completed(&self, order_id: &str) -> CustomResult<(), PlatformError>;
}

/// Builds the absolute URLs the provider needs for redirects and
/// callbacks.
pub trait RouteProvider: Send + Sync {
    fn return_urls(&self, transaction_hash: &str) -> ReturnUrls;
}

/// Localized message lookup, backed by the host's translation snippets.
pub trait MessageCatalog: Send + Sync {
    /// Resolve `key` in `locale`. `None` when the catalog has no entry;
    /// callers fall back to the key itself.
    fn translate(&self, locale: &str, key: &str) -> Option<String>;
}
