//! Custom object converters
//!
//! A [`BlobConverter`] teaches the registries one user type. Registering it
//! contributes an item-read, an item-write and a container-read strategy.

use serde_json::Value;
use std::fmt::Debug;

/// Converts blob bytes to and from a structured value of one user type
pub trait BlobConverter: Send + Sync + Debug {
    /// Type name matched against `ParameterType::Named`
    fn type_name(&self) -> &str;

    /// Decode blob content
    ///
    /// # Errors
    /// `ConverterError::Decode` when the bytes are not a valid value
    fn decode(&self, bytes: &[u8]) -> Result<Value, ConverterError>;

    /// Encode a value as blob content
    ///
    /// # Errors
    /// `ConverterError::Encode` when the value cannot be serialized
    fn encode(&self, value: &Value) -> Result<Vec<u8>, ConverterError>;
}

/// Conversion failures
#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    /// Content could not be decoded
    #[error("cannot decode '{type_name}': {source}")]
    Decode {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },

    /// Value could not be encoded
    #[error("cannot encode '{type_name}': {source}")]
    Encode {
        type_name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// JSON converter for a named type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonConverter {
    type_name: String,
}

impl JsonConverter {
    /// Create converter for `type_name`
    #[inline]
    #[must_use]
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
        }
    }
}

impl BlobConverter for JsonConverter {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, ConverterError> {
        serde_json::from_slice(bytes).map_err(|source| ConverterError::Decode {
            type_name: self.type_name.clone(),
            source,
        })
    }

    fn encode(&self, value: &Value) -> Result<Vec<u8>, ConverterError> {
        serde_json::to_vec(value).map_err(|source| ConverterError::Encode {
            type_name: self.type_name.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_converter_decodes_objects() {
        let converter = JsonConverter::new("Order");
        let value = converter.decode(br#"{"id":7}"#).unwrap();
        assert_eq!(value, json!({"id": 7}));
        assert_eq!(converter.encode(&value).unwrap(), br#"{"id":7}"#.to_vec());
    }

    #[test]
    fn json_converter_reports_type_on_failure() {
        let converter = JsonConverter::new("Order");
        let err = converter.decode(b"not json").unwrap_err();
        assert!(err.to_string().starts_with("cannot decode 'Order'"));
    }
}
