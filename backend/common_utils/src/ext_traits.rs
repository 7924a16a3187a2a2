//! Extension traits for parsing and encoding at the wire boundary.

use error_stack::ResultExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CustomResult, ParsingError, ValidationError};

pub trait BytesExt {
    /// Parse `Bytes` into the given struct, naming the target type in the
    /// error context.
    fn parse_struct<'de, T>(&'de self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: Deserialize<'de>;
}

impl BytesExt for bytes::Bytes {
    fn parse_struct<'de, T>(&'de self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: Deserialize<'de>,
    {
        serde_json::from_slice::<T>(self)
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| {
                let variable_type = std::any::type_name::<T>();
                format!("Unable to parse {variable_type} from bytes")
            })
    }
}

pub trait ByteSliceExt {
    fn parse_struct<'de, T>(&'de self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: Deserialize<'de>;
}

impl ByteSliceExt for [u8] {
    fn parse_struct<'de, T>(&'de self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: Deserialize<'de>,
    {
        serde_json::from_slice(self).change_context(ParsingError::StructParseFailure(type_name))
    }
}

pub trait ValueExt {
    /// Convert a `serde_json::Value` into the given type.
    fn parse_value<T>(self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: serde::de::DeserializeOwned;
}

impl ValueExt for serde_json::Value {
    fn parse_value<T>(self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: serde::de::DeserializeOwned,
    {
        let debug = format!("Unable to parse {type_name} from serde_json::Value");
        serde_json::from_value::<T>(self)
            .change_context(ParsingError::StructParseFailure(type_name))
            .attach_printable_lazy(|| debug)
    }
}

impl<E, S> ValueExt for hyperswitch_masking::Secret<E, S>
where
    E: ValueExt + Clone,
    S: hyperswitch_masking::Strategy<E>,
{
    fn parse_value<T>(self, type_name: &'static str) -> CustomResult<T, ParsingError>
    where
        T: serde::de::DeserializeOwned,
    {
        use hyperswitch_masking::ExposeInterface;
        self.expose().parse_value(type_name)
    }
}

pub trait Encode {
    fn encode_to_string_of_json(&self) -> CustomResult<String, ParsingError>
    where
        Self: Serialize;

    fn encode_to_value(&self) -> CustomResult<serde_json::Value, ParsingError>
    where
        Self: Serialize;
}

impl<T> Encode for T
where
    T: Serialize,
{
    fn encode_to_string_of_json(&self) -> CustomResult<String, ParsingError> {
        serde_json::to_string(self).change_context(ParsingError::EncodeError("json"))
    }

    fn encode_to_value(&self) -> CustomResult<serde_json::Value, ParsingError> {
        serde_json::to_value(self).change_context(ParsingError::EncodeError("json-value"))
    }
}

pub trait OptionExt<T> {
    fn get_required_value(self, field_name: &'static str) -> CustomResult<T, ValidationError>;
}

impl<T> OptionExt<T> for Option<T> {
    fn get_required_value(self, field_name: &'static str) -> CustomResult<T, ValidationError> {
        match self {
            Some(value) => Ok(value),
            None => Err(error_stack::report!(ValidationError::MissingRequiredField {
                field_name: field_name.to_string(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[derive(Debug, PartialEq, serde::Deserialize, serde::Serialize)]
    struct Probe {
        name: String,
        count: i64,
    }

    #[test]
    fn parse_struct_from_bytes() {
        let raw = bytes::Bytes::from_static(b"{\"name\":\"soisy\",\"count\":3}");
        let parsed: Probe = raw.parse_struct("Probe").unwrap();
        assert_eq!(
            parsed,
            Probe {
                name: "soisy".to_string(),
                count: 3
            }
        );
    }

    #[test]
    fn parse_struct_failure_names_the_type() {
        let raw = bytes::Bytes::from_static(b"not json");
        let err = raw.parse_struct::<Probe>("Probe").unwrap_err();
        assert!(err.to_string().contains("Probe"));
    }

    #[test]
    fn get_required_value_on_none() {
        let missing: Option<String> = None;
        let err = missing.get_required_value("billing_address").unwrap_err();
        assert!(matches!(
            err.current_context(),
            ValidationError::MissingRequiredField { field_name } if field_name == "billing_address"
        ));
    }
}
