//! Deploy request and response.
//!
//! # Protocol Flow
//!
//! 1. Client builds a [`DeployRequest`] naming the chain-code and its
//!    initialization entry point
//! 2. Transport installs the chain-code and runs `init` with the given args
//! 3. Transport answers with a [`DeployResponse`] carrying the identifier the
//!    network assigned to the installed chain-code
//! 4. Client targets later queries and invokes at that identifier

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    errors::{ProtocolError, Result},
    names::{CHAINCODE_NAME, INIT_FUNCTION},
};

/// Chain-code installation request handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployRequest {
    /// Logical chain-code name.
    pub chaincode_name: String,
    /// Entry point run once after installation.
    pub function: String,
    /// Positional arguments for `function`.
    pub args: Vec<String>,
    /// How long the transport should wait for the install to commit.
    pub wait_time: Duration,
}

impl DeployRequest {
    /// The session layer's own chain-code: `concerto`, entry `init`, no args.
    pub fn concerto(wait_time: Duration) -> Self {
        Self {
            chaincode_name: CHAINCODE_NAME.to_string(),
            function: INIT_FUNCTION.to_string(),
            args: Vec::new(),
            wait_time,
        }
    }
}

/// Result of a successful chain-code installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployResponse {
    /// Identifier the network assigned to the installed chain-code.
    #[serde(rename = "chaincodeID")]
    pub chaincode_id: String,
}

impl DeployResponse {
    /// Create a response for `chaincode_id`.
    pub fn new(chaincode_id: impl Into<String>) -> Self {
        Self { chaincode_id: chaincode_id.into() }
    }

    /// Decode a transport's JSON deploy result.
    pub fn from_bytes(payload: &[u8]) -> Result<Self> {
        serde_json::from_slice(payload)
            .map_err(|source| ProtocolError::Malformed { payload: "deploy", source })
    }
}
