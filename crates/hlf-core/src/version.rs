//! Client/chain-code version compatibility.
//!
//! Chain-code and client are released independently. Before a client trusts
//! a chain-code it asks for the chain-code's version and refuses to continue
//! unless the two strings are identical. There is no semver range matching:
//! any difference, including build metadata, is a mismatch.

use hlf_proto::PingResponse;

use crate::error::ConnectorError;

/// Version this client was built at.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Compare a deployed chain-code version against the client version.
///
/// # Errors
///
/// Returns `VersionMismatch` embedding both versions unless they are
/// byte-for-byte equal.
pub fn check_compatible(deployed: &str, client: &str) -> Result<(), ConnectorError> {
    if deployed.as_bytes() == client.as_bytes() {
        return Ok(());
    }

    Err(ConnectorError::VersionMismatch { deployed: deployed.to_string(), client: client.to_string() })
}

/// Decode a raw ping payload and compare its version against `client`.
///
/// # Errors
///
/// Returns `InvalidPingResponse` if the payload does not decode, otherwise
/// whatever [`check_compatible`] returns.
pub fn check_ping_payload(payload: &[u8], client: &str) -> Result<(), ConnectorError> {
    let ping = PingResponse::from_bytes(payload).map_err(ConnectorError::InvalidPingResponse)?;
    check_compatible(&ping.version, client)
}
