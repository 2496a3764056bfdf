//! Client-side session layer for permissioned ledger networks.
//!
//! The session layer sits between application code and the network client
//! library. It owns one transport handle and drives a fixed protocol over
//! it: enroll an identity, optionally install the session chain-code, check
//! that the deployed chain-code was built for this client, then dispatch
//! queries and invokes until the caller disconnects.
//!
//! # Architecture
//!
//! The network client is reached only through the [`Transport`] trait, so
//! the protocol logic here runs unchanged against a production client or
//! the in-memory fake used by tests.
//!
//! Identity is a capability token. [`Connection::login`] hands the caller a
//! [`SecurityContext`] and then forgets it; every privileged operation takes
//! the context back as an explicit argument and runs a [`SecurityCheck`]
//! against it before touching the transport. Several identities can share
//! one connection this way without any hidden session state.
//!
//! # Components
//!
//! - [`connection`]: Connection lifecycle (login, deploy, ping, dispatch,
//!   disconnect)
//! - [`context`]: Security context carried between calls
//! - [`credentials`]: Enrollment credential validation
//! - [`security`]: Security check hook
//! - [`dispatch`]: Stateless wire-call helpers
//! - [`version`]: Client/chain-code version compatibility
//! - [`transport`]: Transport abstraction
//! - [`config`]: Connection configuration and profiles
//! - [`error`]: Error taxonomy

pub mod config;
pub mod connection;
pub mod context;
pub mod credentials;
pub mod dispatch;
pub mod error;
pub mod security;
pub mod transport;
pub mod version;

pub use config::{ConnectionConfig, ConnectionProfile};
pub use connection::{Connection, ConnectionId};
pub use context::SecurityContext;
pub use credentials::Credentials;
pub use error::{ConfigError, ConnectorError, SecurityError, ValidationError};
pub use security::{IssuerCheck, SecurityCheck};
pub use transport::{Invocation, Transport, TransportError};
pub use version::CLIENT_VERSION;
