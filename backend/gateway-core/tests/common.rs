#![allow(dead_code)]
#![allow(clippy::unwrap_used)]

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use common_enums::{Currency, TransactionKind};
use common_utils::{
    consts::Env,
    crypto::{self, SignMessage},
    pii::Email,
    types::FloatMajorUnit,
    CustomResult,
};
use domain_types::{
    connector_types::{ConnectorEnum, GatewayAccount, RequestDetails},
    router_data::ConnectorAuthType,
    transaction::{BillingAddress, Order, Transaction},
    types::{ConnectorParams, Connectors, Proxy},
};
use error_stack::report;
use gateway_core::{
    configs::{Common, Config},
    logger::config::Log,
    payments::Payments,
    translations::StaticMessageCatalog,
};
use hyperswitch_masking::Secret;
use interfaces::platform::{
    OrderAccess, PlatformError, RouteProvider, TransactionStore,
};

pub const WEBHOOK_SECRET: &str = "wh_secret";

/// Gateway account configured the way a merchant would: token, shop id
/// and the webhook secret, live environment, English ledger messages.
pub fn account() -> GatewayAccount {
    GatewayAccount {
        connector: ConnectorEnum::Soisy,
        auth: ConnectorAuthType::SignatureKey {
            api_key: Secret::new("test_auth_token".to_string()),
            key1: Secret::new("shop_1".to_string()),
            api_secret: Secret::new(WEBHOOK_SECRET.to_string()),
        },
        test_mode: false,
        locale: "en".to_string(),
    }
}

pub fn test_config(base_url: &str) -> Arc<Config> {
    Arc::new(Config {
        common: Common {
            environment: Env::Development,
        },
        log: Log::default(),
        proxy: Proxy::default(),
        connectors: Connectors {
            soisy: ConnectorParams {
                base_url: base_url.to_string(),
                sandbox_base_url: None,
                min_order_total: None,
                max_order_total: None,
            },
        },
    })
}

pub fn order(order_id: &str, total: f64) -> Order {
    Order {
        order_id: order_id.to_string(),
        email: Email::try_from("buyer@example.com".to_string()).unwrap(),
        total: FloatMajorUnit::new(total),
        currency: Currency::EUR,
        billing_address: Some(BillingAddress {
            first_name: Some(Secret::new("Mario".to_string())),
            last_name: Some(Secret::new("Rossi".to_string())),
            line1: Some(Secret::new("Via Roma 1".to_string())),
            city: Some("Modena".to_string()),
            zip: Some(Secret::new("41121".to_string())),
        }),
        completed: false,
    }
}

pub fn purchase_transaction(transaction_hash: &str, order_id: &str) -> Transaction {
    Transaction::new(transaction_hash, order_id, TransactionKind::Purchase)
}

/// Webhook delivery with a valid `x-soisy-signature` over the raw body.
pub fn signed_webhook(body: Vec<u8>) -> RequestDetails {
    let signature = crypto::HmacSha256
        .sign_message(WEBHOOK_SECRET.as_bytes(), &body)
        .unwrap();
    webhook_with_signature(body, Some(hex::encode(signature)))
}

pub fn webhook_with_signature(body: Vec<u8>, signature: Option<String>) -> RequestDetails {
    let mut headers = HashMap::new();
    if let Some(signature) = signature {
        headers.insert("x-soisy-signature".to_string(), signature);
    }
    RequestDetails {
        method: common_utils::request::Method::Post,
        uri: Some("/webhooks/soisy".to_string()),
        headers,
        body,
        query_params: None,
    }
}

/// In-memory stand-in for the host platform: an order table, an
/// append-only transaction list, and a record of completion calls.
#[derive(Default)]
pub struct InMemoryPlatform {
    transactions: Mutex<Vec<Transaction>>,
    orders: Mutex<HashMap<String, Order>>,
    completions: Mutex<Vec<String>>,
    child_seq: AtomicUsize,
}

impl InMemoryPlatform {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn seed_order(&self, order: Order) {
        self.orders
            .lock()
            .unwrap()
            .insert(order.order_id.clone(), order);
    }

    pub fn seed_transaction(&self, transaction: Transaction) {
        self.transactions.lock().unwrap().push(transaction);
    }

    /// Saved entries that record provider events, i.e. everything below
    /// the seeded roots.
    pub fn children(&self) -> Vec<Transaction> {
        self.transactions
            .lock()
            .unwrap()
            .iter()
            .filter(|transaction| transaction.parent_hash.is_some())
            .cloned()
            .collect()
    }

    pub fn completions(&self) -> Vec<String> {
        self.completions.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TransactionStore for InMemoryPlatform {
    async fn find_by_hash(
        &self,
        transaction_hash: &str,
    ) -> CustomResult<Option<Transaction>, PlatformError> {
        Ok(self
            .transactions
            .lock()
            .map_err(|_| report!(PlatformError::StorageFailure))?
            .iter()
            .find(|transaction| transaction.transaction_hash == transaction_hash)
            .cloned())
    }

    async fn has_successful_child(
        &self,
        parent_hash: &str,
    ) -> CustomResult<bool, PlatformError> {
        Ok(self
            .transactions
            .lock()
            .map_err(|_| report!(PlatformError::StorageFailure))?
            .iter()
            .any(|transaction| {
                transaction.parent_hash.as_deref() == Some(parent_hash)
                    && transaction.is_successful()
            }))
    }

    async fn create_child(
        &self,
        parent: &Transaction,
    ) -> CustomResult<Transaction, PlatformError> {
        let sequence = self.child_seq.fetch_add(1, Ordering::SeqCst);
        Ok(parent.child_of(format!("{}-evt-{}", parent.transaction_hash, sequence)))
    }

    async fn save(&self, transaction: &Transaction) -> CustomResult<(), PlatformError> {
        self.transactions
            .lock()
            .map_err(|_| report!(PlatformError::StorageFailure))?
            .push(transaction.clone());
        Ok(())
    }
}

#[async_trait::async_trait]
impl OrderAccess for InMemoryPlatform {
    async fn get_order(&self, order_id: &str) -> CustomResult<Option<Order>, PlatformError> {
        Ok(self
            .orders
            .lock()
            .map_err(|_| report!(PlatformError::StorageFailure))?
            .get(order_id)
            .cloned())
    }

    async fn mark_completed(&self, order_id: &str) -> CustomResult<(), PlatformError> {
        let mut orders = self
            .orders
            .lock()
            .map_err(|_| report!(PlatformError::StorageFailure))?;
        if let Some(order) = orders.get_mut(order_id) {
            order.completed = true;
        }
        self.completions
            .lock()
            .map_err(|_| report!(PlatformError::StorageFailure))?
            .push(order_id.to_string());
        Ok(())
    }
}

impl RouteProvider for InMemoryPlatform {
    fn return_urls(&self, transaction_hash: &str) -> domain_types::connector_types::ReturnUrls {
        domain_types::connector_types::ReturnUrls {
            success_url: "https://shop.example.com/checkout/success".to_string(),
            error_url: "https://shop.example.com/checkout/cancel".to_string(),
            callback_url: format!(
                "https://shop.example.com/webhooks/soisy?hash={transaction_hash}"
            ),
        }
    }
}

pub fn service(config: Arc<Config>, platform: Arc<InMemoryPlatform>) -> Payments {
    Payments::new(
        config,
        platform.clone(),
        platform.clone(),
        platform,
        Arc::new(StaticMessageCatalog),
    )
}
