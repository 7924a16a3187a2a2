use common_enums::{Currency, TransactionKind, TransactionStatus};
use common_utils::{date_time, pii::Email, types::FloatMajorUnit, SecretSerdeValue};
use hyperswitch_masking::Secret;
use time::PrimitiveDateTime;

use crate::utils::{missing_field_err, Error};

/// One entry in the host platform's payment ledger.
///
/// A transaction is created by the host when checkout begins and is never
/// rewritten afterwards; every provider event observed later is recorded as
/// a new child entry pointing back at the original via `parent_hash`. The
/// `transaction_hash` doubles as the correlation id sent to the provider,
/// which echoes it back in webhook notifications.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Transaction {
    pub transaction_hash: String,
    pub order_id: String,
    pub kind: TransactionKind,
    pub status: Option<TransactionStatus>,
    pub parent_hash: Option<String>,
    /// Provider-side token for this entry, when the provider supplied one.
    pub reference: Option<String>,
    /// Raw event identifier that produced this entry.
    pub code: Option<String>,
    /// Human-readable description of the last event, already localized.
    pub message: Option<String>,
    /// Opaque capture of the provider interaction that produced this entry.
    pub payload: Option<SecretSerdeValue>,
    pub created_at: PrimitiveDateTime,
}

impl Transaction {
    /// Root entry for a fresh payment attempt. Starts out pending.
    pub fn new(
        transaction_hash: impl Into<String>,
        order_id: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            transaction_hash: transaction_hash.into(),
            order_id: order_id.into(),
            kind,
            status: Some(TransactionStatus::Pending),
            parent_hash: None,
            reference: None,
            code: None,
            message: None,
            payload: None,
            created_at: date_time::now(),
        }
    }

    /// Derive a child entry recording one provider event against this
    /// transaction. The child shares the parent's kind and order and starts
    /// with no status; the caller fills in whatever the event mapped to.
    pub fn child_of(&self, transaction_hash: impl Into<String>) -> Self {
        Self {
            transaction_hash: transaction_hash.into(),
            order_id: self.order_id.clone(),
            kind: self.kind,
            status: None,
            parent_hash: Some(self.transaction_hash.clone()),
            reference: None,
            code: None,
            message: None,
            payload: None,
            created_at: date_time::now(),
        }
    }

    pub fn is_successful(&self) -> bool {
        self.status == Some(TransactionStatus::Success)
    }
}

/// The slice of the host platform's order the gateway needs: who is paying,
/// how much, and where they live.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Order {
    pub order_id: String,
    pub email: Email,
    pub total: FloatMajorUnit,
    pub currency: Currency,
    pub billing_address: Option<BillingAddress>,
    pub completed: bool,
}

impl Order {
    pub fn get_billing_address(&self) -> Result<&BillingAddress, Error> {
        self.billing_address
            .as_ref()
            .ok_or_else(missing_field_err("billing.address"))
    }
}

/// Billing address fields the provider's order API consumes. Names and
/// street data are personally identifiable and stay wrapped until the wire
/// payload is built.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct BillingAddress {
    pub first_name: Option<Secret<String>>,
    pub last_name: Option<Secret<String>>,
    pub line1: Option<Secret<String>>,
    pub city: Option<String>,
    pub zip: Option<Secret<String>>,
}

impl BillingAddress {
    pub fn get_first_name(&self) -> Result<Secret<String>, Error> {
        self.first_name
            .clone()
            .ok_or_else(missing_field_err("billing.address.first_name"))
    }

    pub fn get_last_name(&self) -> Result<Secret<String>, Error> {
        self.last_name
            .clone()
            .ok_or_else(missing_field_err("billing.address.last_name"))
    }

    pub fn get_line1(&self) -> Result<Secret<String>, Error> {
        self.line1
            .clone()
            .ok_or_else(missing_field_err("billing.address.line1"))
    }

    pub fn get_city(&self) -> Result<String, Error> {
        self.city
            .clone()
            .ok_or_else(missing_field_err("billing.address.city"))
    }

    pub fn get_zip(&self) -> Result<Secret<String>, Error> {
        self.zip
            .clone()
            .ok_or_else(missing_field_err("billing.address.zip"))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::errors::ConnectorError;

    fn pending_purchase() -> Transaction {
        Transaction::new("hash-1", "order-1", TransactionKind::Purchase)
    }

    #[test]
    fn new_transaction_starts_pending_without_parent() {
        let txn = pending_purchase();
        assert_eq!(txn.status, Some(TransactionStatus::Pending));
        assert_eq!(txn.parent_hash, None);
    }

    #[test]
    fn child_inherits_kind_and_order_but_not_status() {
        let parent = pending_purchase();
        let child = parent.child_of("hash-2");
        assert_eq!(child.kind, TransactionKind::Purchase);
        assert_eq!(child.order_id, "order-1");
        assert_eq!(child.parent_hash.as_deref(), Some("hash-1"));
        assert_eq!(child.status, None);
        assert!(!child.is_successful());
    }

    #[test]
    fn missing_address_fields_surface_as_required_field_errors() {
        let address = BillingAddress::default();
        let err = address.get_first_name().unwrap_err();
        assert_eq!(
            err.current_context(),
            &ConnectorError::MissingRequiredField {
                field_name: "billing.address.first_name"
            }
        );
    }
}
