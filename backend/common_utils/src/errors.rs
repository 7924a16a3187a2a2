//! Errors and their custom result type, shared by every crate in the
//! workspace.

/// The custom error-stack backed result type used throughout the service.
pub type CustomResult<T, E> = error_stack::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ParsingError {
    #[error("Failed to parse struct: {0}")]
    StructParseFailure(&'static str),
    #[error("Failed to serialize to {0} format")]
    EncodeError(&'static str),
    #[error("Failed to convert i64 value to Decimal")]
    I64ToDecimalConversionFailure,
    #[error("Failed to convert f64 value to Decimal")]
    FloatToDecimalConversionFailure,
    #[error("Failed to convert Decimal value to i64")]
    DecimalToI64ConversionFailure,
    #[error("Failed to convert string value to Decimal: {error}")]
    StringToDecimalConversionFailure { error: String },
    #[error("Failed to parse email")]
    EmailParsingError,
}

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: String },
    #[error("{message}")]
    InvalidValue { message: String },
}

#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("Failed to encode the given message")]
    EncodingFailed,
    #[error("Failed to sign message")]
    MessageSigningFailed,
    #[error("Failed to verify signature")]
    SignatureVerificationFailed,
}
