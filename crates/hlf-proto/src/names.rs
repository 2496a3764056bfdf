//! Well-known chain-code names and entry points.

/// Logical name the session layer deploys its chain-code under.
pub const CHAINCODE_NAME: &str = "concerto";

/// Entry point invoked once when the chain-code is installed.
pub const INIT_FUNCTION: &str = "init";

/// Read-only entry point reporting the deployed chain-code version.
pub const PING_FUNCTION: &str = "ping";
