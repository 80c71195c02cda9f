//! Codec trait and implementations for serializing protocol values.
//!
//! The core hands its results to external collaborators (the word-cloud
//! renderer, whatever transport pushes snapshots to clients) as plain
//! values. A [`Codec`] turns those values into bytes at that boundary.
//! Only [`JsonCodec`] exists today; a binary codec can be added without
//! touching any other code.

use serde::{Serialize, de::DeserializeOwned};

use crate::ProtocolError;

/// Encodes protocol values to bytes and decodes them back.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Encode`] if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns [`ProtocolError::Decode`] if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// The snapshot consumers on the other side of this boundary are
/// browser-side renderers, so the human-readable format is also the
/// production one. Behind the `json` feature (enabled by default).
///
/// ## Example
///
/// ```rust
/// use wordwall_protocol::{Codec, JsonCodec, WordCount};
///
/// let codec = JsonCodec;
/// let count = WordCount { word: "hello".into(), count: 3 };
///
/// let bytes = codec.encode(&count).unwrap();
/// let decoded: WordCount = codec.decode(&bytes).unwrap();
/// assert_eq!(count, decoded);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
