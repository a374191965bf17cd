use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Schema identifier written to `@type` unless overridden.
pub const TYPE_V1_0: &str = "NC.TMFErrorResponse.v1.0";

/// Nested error inside a [`ResponseDto`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDto {
    /// Error identifier, preserved across services.
    #[serde(default)]
    pub id: String,
    /// Classification code.
    #[serde(default)]
    pub code: String,
    /// Classification title.
    #[serde(default)]
    pub reason: String,
    /// Optional detail text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_error: Option<String>,
    /// Status code in decimal string form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub source: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

/// Top-level error envelope.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDto {
    /// Error identifier, preserved across services.
    #[serde(default)]
    pub id: String,
    /// Classification code.
    #[serde(default)]
    pub code: String,
    /// Classification title.
    #[serde(default)]
    pub reason: String,
    /// Detail text; always present on the wire.
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_error: Option<String>,
    /// Status code in decimal string form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "is_absent")]
    pub source: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
    /// Independent nested errors; one level deep.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorDto>>,
    /// Envelope schema identifier.
    #[serde(rename = "@type", default)]
    pub schema_type: String,
    #[serde(
        rename = "@schemaLocation",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_location: Option<String>,
}

fn is_absent(value: &Option<Value>) -> bool {
    value.as_ref().is_none_or(Value::is_null)
}
