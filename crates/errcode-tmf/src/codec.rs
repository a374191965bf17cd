use serde::{Serialize, de::DeserializeOwned};

use crate::TmfError;

/// Serializes an envelope to compact JSON.
pub fn encode<T: Serialize>(value: &T) -> Result<String, TmfError> {
    serde_json::to_string(value).map_err(|err| TmfError::Encode(err.to_string()))
}

/// Serializes an envelope to indented JSON.
pub fn encode_pretty<T: Serialize>(value: &T) -> Result<String, TmfError> {
    serde_json::to_string_pretty(value).map_err(|err| TmfError::Encode(err.to_string()))
}

/// Deserializes an envelope from JSON text.
pub fn decode<T: DeserializeOwned>(text: &str) -> Result<T, TmfError> {
    serde_json::from_str(text).map_err(|err| TmfError::Decode(err.to_string()))
}
