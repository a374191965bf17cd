use thiserror::Error;

/// JSON encoding failures for envelope payloads.
#[derive(Debug, Error)]
pub enum TmfError {
    /// Envelope serialization failed.
    #[error("failed to encode envelope json: {0}")]
    Encode(String),
    /// Envelope deserialization failed.
    #[error("failed to decode envelope json: {0}")]
    Decode(String),
}
