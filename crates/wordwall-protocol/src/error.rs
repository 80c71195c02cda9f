//! Error types for the protocol layer.
//!
//! Each crate in Word Wall defines its own error enum. A `ProtocolError`
//! always means serialization trouble, never a session or tally problem.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a value into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a value).
    ///
    /// Common causes: malformed JSON, missing required fields,
    /// wrong data types, or truncated input.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),
}
