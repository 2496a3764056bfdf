//! Ping payload.
//!
//! The chain-code's `ping` function answers with a JSON object carrying the
//! version it was built at, e.g. `{"version":"0.3.1"}`. Unknown fields are
//! ignored so newer chain-code can report more without breaking old clients.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::errors::{ProtocolError, Result};

/// Decoded response of the chain-code `ping` function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PingResponse {
    /// Version string the deployed chain-code was built at.
    pub version: String,
}

impl PingResponse {
    /// Create a response reporting `version`.
    pub fn new(version: impl Into<String>) -> Self {
        Self { version: version.into() }
    }

    /// Decode the raw bytes returned by the `ping` query.
    pub fn from_bytes(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload)
            .map_err(|source| ProtocolError::Malformed { payload: "ping", source })
    }

    /// Encode as the bytes chain-code would return.
    pub fn to_bytes(&self) -> Result<Bytes> {
        serde_json::to_vec(self)
            .map(Bytes::from)
            .map_err(|source| ProtocolError::Encode { payload: "ping", source })
    }
}
