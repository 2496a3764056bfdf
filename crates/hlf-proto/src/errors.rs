//! Protocol error types.

use thiserror::Error;

/// Result alias for payload decoding.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Errors raised while decoding or encoding chain-code payloads.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Payload was not valid JSON or did not match the expected shape.
    #[error("malformed {payload} payload: {source}")]
    Malformed {
        /// Which payload failed to decode.
        payload: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Payload could not be serialized.
    #[error("failed to encode {payload} payload: {source}")]
    Encode {
        /// Which payload failed to encode.
        payload: &'static str,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}
