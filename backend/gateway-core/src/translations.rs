//! Built-in catalog for provider event descriptions.
//!
//! Providers send short English phrases with their webhook events; the
//! ledger stores a fuller, localized explanation of what the event means.
//! Hosts with their own translation layer implement
//! [`MessageCatalog`] over it instead; this catalog covers the locales the
//! gateway ships with.

use interfaces::platform::MessageCatalog;

/// Catalog backed by the tables compiled into the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticMessageCatalog;

const ENGLISH: &[(&str, &str)] = &[
    (
        "loan approved",
        "The applicant has passed the automatic pre-approval of Soisy systems and is continuing to enter their data.",
    ),
    (
        "waiting for verification",
        "The applicant has completed the application process and is now awaiting checks by Soisy operators.",
    ),
    (
        "waiting for disbursement",
        "The installment payment request has been approved by an operator. The payment will be funded.",
    ),
    (
        "payment received",
        "The installment payment request is financed permanently.",
    ),
    (
        "payment failed",
        "Request for pre-approval of the installment payment was refused by Soisy automatic systems.",
    ),
    (
        "documents check KO",
        "Soisy, after the appropriate checks, refused the customer data or documents.",
    ),
];

const ITALIAN: &[(&str, &str)] = &[
    (
        "loan approved",
        "Il richiedente ha superato la pre-approvazione automatica dei sistemi di Soisy e sta proseguendo con la immissione dei propri dati.",
    ),
    (
        "waiting for verification",
        "Il richiedente ha completato il processo di richiesta e ora sta attendendo le verifiche in capo agli operatori di Soisy.",
    ),
    (
        "waiting for disbursement",
        "La richiesta di pagamento rateale è stata approvata da un operatore. Il pagamento verrà finanziato.",
    ),
    (
        "payment received",
        "La richiesta di pagamento rateale viene finanziata definitivamente.",
    ),
    (
        "payment failed",
        "La richiesta di pre-approvazione del pagamento rateale è stata rifiutata dai sistemi automatici di Soisy.",
    ),
    (
        "documents check KO",
        "Soisy, dopo le opportune verifiche, ha rifiutato i dati o i documenti relativi al cliente.",
    ),
];

impl MessageCatalog for StaticMessageCatalog {
    fn translate(&self, locale: &str, key: &str) -> Option<String> {
        let table = if locale.starts_with("it") {
            ITALIAN
        } else {
            ENGLISH
        };
        table
            .iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, message)| (*message).to_string())
    }
}
