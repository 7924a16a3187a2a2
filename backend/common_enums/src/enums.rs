#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::VariantNames,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    AED,
    AUD,
    BHD,
    BIF,
    BRL,
    CAD,
    CHF,
    CLP,
    CNY,
    CZK,
    DJF,
    DKK,
    #[default]
    EUR,
    GBP,
    GNF,
    HKD,
    HUF,
    INR,
    JOD,
    JPY,
    KMF,
    KRW,
    KWD,
    MGA,
    MXN,
    NOK,
    NZD,
    OMR,
    PLN,
    PYG,
    RON,
    RWF,
    SEK,
    SGD,
    TND,
    TRY,
    UGX,
    USD,
    VND,
    VUV,
    XAF,
    XOF,
    XPF,
    ZAR,
}

impl Currency {
    pub fn iso_4217(self) -> &'static str {
        match self {
            Self::AED => "784",
            Self::AUD => "036",
            Self::BHD => "048",
            Self::BIF => "108",
            Self::BRL => "986",
            Self::CAD => "124",
            Self::CHF => "756",
            Self::CLP => "152",
            Self::CNY => "156",
            Self::CZK => "203",
            Self::DJF => "262",
            Self::DKK => "208",
            Self::EUR => "978",
            Self::GBP => "826",
            Self::GNF => "324",
            Self::HKD => "344",
            Self::HUF => "348",
            Self::INR => "356",
            Self::JOD => "400",
            Self::JPY => "392",
            Self::KMF => "174",
            Self::KRW => "410",
            Self::KWD => "414",
            Self::MGA => "969",
            Self::MXN => "484",
            Self::NOK => "578",
            Self::NZD => "554",
            Self::OMR => "512",
            Self::PLN => "985",
            Self::PYG => "600",
            Self::RON => "946",
            Self::RWF => "646",
            Self::SEK => "752",
            Self::SGD => "702",
            Self::TND => "788",
            Self::TRY => "949",
            Self::UGX => "800",
            Self::USD => "840",
            Self::VND => "704",
            Self::VUV => "548",
            Self::XAF => "950",
            Self::XOF => "952",
            Self::XPF => "953",
            Self::ZAR => "710",
        }
    }

    pub fn is_zero_decimal_currency(self) -> bool {
        matches!(
            self,
            Self::BIF
                | Self::CLP
                | Self::DJF
                | Self::GNF
                | Self::JPY
                | Self::KMF
                | Self::KRW
                | Self::MGA
                | Self::PYG
                | Self::RWF
                | Self::UGX
                | Self::VND
                | Self::VUV
                | Self::XAF
                | Self::XOF
                | Self::XPF
        )
    }

    pub fn is_three_decimal_currency(self) -> bool {
        matches!(
            self,
            Self::BHD | Self::JOD | Self::KWD | Self::OMR | Self::TND
        )
    }

    pub fn number_of_digits_after_decimal_point(self) -> u8 {
        if self.is_zero_decimal_currency() {
            0
        } else if self.is_three_decimal_currency() {
            3
        } else {
            2
        }
    }
}

/// The status recorded on a ledger transaction. Child transactions appended
/// by the webhook processor may carry no status at all when the provider
/// event is unrecognized, hence this enum is always wrapped in `Option` on
/// the transaction record.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionStatus {
    Pending,
    Processing,
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn is_terminal_status(self) -> bool {
        matches!(self, Self::Success | Self::Failed)
    }
}

/// What kind of payment operation a transaction records. Children inherit
/// the kind of their parent.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionKind {
    Authorize,
    Purchase,
    Capture,
}

/// The operations a connector may declare support for. Mirrors the flag set
/// a host commerce platform queries before routing a call to the gateway.
#[derive(
    Clone,
    Copy,
    Debug,
    Hash,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Capability {
    Authorize,
    Purchase,
    Capture,
    CompleteAuthorize,
    CompletePurchase,
    PaymentSources,
    Refund,
    PartialRefund,
    Webhooks,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn currency_decimal_digits() {
        assert_eq!(Currency::EUR.number_of_digits_after_decimal_point(), 2);
        assert_eq!(Currency::JPY.number_of_digits_after_decimal_point(), 0);
        assert_eq!(Currency::KWD.number_of_digits_after_decimal_point(), 3);
    }

    #[test]
    fn transaction_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&TransactionStatus::Processing).unwrap(),
            "\"processing\""
        );
        assert_eq!(TransactionStatus::Success.to_string(), "success");
    }

    #[test]
    fn terminal_statuses() {
        assert!(TransactionStatus::Success.is_terminal_status());
        assert!(TransactionStatus::Failed.is_terminal_status());
        assert!(!TransactionStatus::Pending.is_terminal_status());
        assert!(!TransactionStatus::Processing.is_terminal_status());
    }
}
