//! Connection lifecycle for the ledger session layer.
//!
//! A [`Connection`] owns one transport handle and drives every interaction
//! with chain-code through it.
//!
//! # Lifecycle
//!
//! ```text
//! ┌───────┐  login   ┌─────────┐  deploy   ┌───────┐  query/invoke
//! │ Fresh │────────>│ Context │─────────>│ Bound │───────────────┐
//! └───────┘          └─────────┘           └───────┘<──────────────┘
//!     │                                        │
//!     │ connect_event_hub                      │ disconnect
//!     ↓                                        ↓
//! ┌───────────┐        disconnect         ┌──────────────┐
//! │ Connected │─────────────────────────>│ Disconnected │
//! └───────────┘                           └──────────────┘
//! ```
//!
//! 1. **Login**: credentials are validated, then enrolled; the caller gets a
//!    [`SecurityContext`] and owns it from then on
//! 2. **Deploy**: installs the session chain-code, pings it, and only then
//!    binds its identifier onto the context
//! 3. **Dispatch**: every query and invoke runs one security check, then one
//!    transport call
//! 4. **Disconnect**: drops the event subscription exactly once
//!
//! # Failure semantics
//!
//! Nothing is retried. Every failure is returned to the caller, and a failed
//! deploy leaves the context exactly as it was.

use std::{
    fmt,
    sync::atomic::{AtomicBool, Ordering},
};

use bytes::Bytes;
use hlf_proto::{DeployRequest, names::PING_FUNCTION};
use tracing::{debug, info, warn};

use crate::{
    config::{ConnectionConfig, ConnectionProfile},
    context::SecurityContext,
    credentials::Credentials,
    dispatch,
    error::ConnectorError,
    security::{IssuerCheck, SecurityCheck},
    transport::{Invocation, Transport},
    version,
};

/// Identifies a connection. Security contexts record the one that issued
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a fresh random identifier.
    pub fn random() -> Self {
        Self(rand::random())
    }

    /// Wrap a raw identifier.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Session over one transport handle.
///
/// All operations take `&self`. The connection does no queueing or locking
/// of its own: concurrent operations reach the transport in whatever order
/// they are polled, so callers that need ordering must serialize.
pub struct Connection<T: Transport, S: SecurityCheck = IssuerCheck> {
    /// Identifier stamped into issued contexts
    id: ConnectionId,
    /// Exclusively owned transport handle
    transport: T,
    /// Check run before every privileged operation
    security: S,
    /// Configuration
    config: ConnectionConfig,
    /// Event subscription established
    connected: AtomicBool,
}

impl<T: Transport> Connection<T> {
    /// Create a connection over `transport` with the default security check.
    pub fn new(transport: T, config: ConnectionConfig) -> Self {
        Self::with_security_check(transport, config, IssuerCheck)
    }
}

impl<T: Transport, S: SecurityCheck> Connection<T, S> {
    /// Create a connection over `transport` with a custom security check.
    pub fn with_security_check(transport: T, config: ConnectionConfig, security: S) -> Self {
        Self {
            id: ConnectionId::random(),
            transport,
            security,
            config,
            connected: AtomicBool::new(false),
        }
    }

    /// Connection identifier.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Configuration this connection was created with.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Endpoints the transport was opened against.
    pub fn profile(&self) -> &ConnectionProfile {
        &self.config.profile
    }

    /// Version compared against deployed chain-code.
    pub fn client_version(&self) -> &str {
        &self.config.client_version
    }

    /// Whether the event subscription is established.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Subscribe to ledger events on the profile's event hub.
    ///
    /// No-op if already connected.
    pub async fn connect_event_hub(&self) -> Result<(), ConnectorError> {
        if self.is_connected() {
            return Ok(());
        }

        let url = self.config.profile.event_hub_url.as_str();
        debug!(connection = %self.id, url, "connecting event hub");
        self.transport.event_hub_connect(url).await.map_err(ConnectorError::EventHub)?;

        self.connected.store(true, Ordering::Release);
        info!(connection = %self.id, url, "event hub connected");
        Ok(())
    }

    /// Drop the event subscription.
    ///
    /// Only the call that observes the connection as connected reaches the
    /// transport; every other call returns immediately. The flag is cleared
    /// even if the transport reports a failure.
    pub async fn disconnect(&self) -> Result<(), ConnectorError> {
        if self
            .connected
            .compare_exchange(true, false, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!(connection = %self.id, "already disconnected");
            return Ok(());
        }

        self.transport.event_hub_disconnect().await.map_err(ConnectorError::EventHub)?;

        info!(connection = %self.id, "disconnected");
        Ok(())
    }

    /// Enroll and return a fresh security context.
    ///
    /// Credentials are validated before the transport is touched.
    ///
    /// # Errors
    ///
    /// - `Validation` if either credential is empty
    /// - `Enrollment` with the transport's message if enrollment fails
    pub async fn login(
        &self,
        enrollment_id: &str,
        enrollment_secret: &str,
    ) -> Result<SecurityContext<T>, ConnectorError> {
        let credentials = Credentials::new(enrollment_id, enrollment_secret)?;
        self.login_with(credentials).await
    }

    /// Enroll with already validated credentials.
    pub async fn login_with(
        &self,
        credentials: Credentials<'_>,
    ) -> Result<SecurityContext<T>, ConnectorError> {
        let enrollment_id = credentials.enrollment_id();
        debug!(connection = %self.id, enrollment_id, "enrolling");

        let member = self
            .transport
            .enroll(enrollment_id, credentials.enrollment_secret())
            .await
            .map_err(|err| {
                warn!(connection = %self.id, enrollment_id, error = %err, "enrollment failed");
                ConnectorError::Enrollment(err)
            })?;

        let context = SecurityContext::new(self.id, member, self.transport.event_hub());
        info!(connection = %self.id, enrollment_id, "enrolled");
        Ok(context)
    }

    /// Install the session chain-code and bind it onto `context`.
    ///
    /// The identifier is bound only after the freshly installed chain-code
    /// answers ping with this client's version. Deploying again on the same
    /// context replaces the binding; the earlier chain-code is left running.
    ///
    /// # Errors
    ///
    /// - `Security` if the check rejects `context`
    /// - `Deployment` with the transport's message if installation fails
    /// - any [`ping`](Self::ping) error against the new chain-code
    pub async fn deploy(&self, context: &mut SecurityContext<T>) -> Result<(), ConnectorError> {
        self.security_check(context)?;

        let request = DeployRequest::concerto(self.config.profile.deploy_wait());
        let response = dispatch::deploy_chaincode(&self.transport, context, &request).await?;
        debug!(connection = %self.id, chaincode_id = %response.chaincode_id, "chain-code installed");

        self.ping_chaincode(context, Some(response.chaincode_id.as_str())).await?;

        info!(connection = %self.id, chaincode_id = %response.chaincode_id, "chain-code deployed");
        if let Some(previous) = context.bind_chaincode(response.chaincode_id) {
            warn!(connection = %self.id, previous = %previous, "replaced earlier chain-code binding");
        }
        Ok(())
    }

    /// Check that the bound chain-code was built at this client's version.
    ///
    /// # Errors
    ///
    /// - `Security` if the check rejects `context`
    /// - `ChainCode` if the ping query fails
    /// - `InvalidPingResponse` if the answer does not decode
    /// - `VersionMismatch` if the versions differ
    pub async fn ping(&self, context: &SecurityContext<T>) -> Result<(), ConnectorError> {
        self.ping_chaincode(context, context.chaincode_id()).await
    }

    /// Evaluate a read-only chain-code function.
    ///
    /// `function` and `args` reach the transport unchanged and its answer or
    /// failure is returned unchanged.
    pub async fn query_chaincode(
        &self,
        context: &SecurityContext<T>,
        function: &str,
        args: &[String],
    ) -> Result<Bytes, ConnectorError> {
        self.security_check(context)?;

        let invocation = Invocation::new(context.chaincode_id(), function, args);
        dispatch::query_chaincode(&self.transport, context, invocation).await
    }

    /// Submit a state-changing chain-code transaction.
    ///
    /// Same pass-through rules as [`query_chaincode`](Self::query_chaincode);
    /// the profile's invoke wait travels along as a hint.
    pub async fn invoke_chaincode(
        &self,
        context: &SecurityContext<T>,
        function: &str,
        args: &[String],
    ) -> Result<Bytes, ConnectorError> {
        self.security_check(context)?;

        let invocation = Invocation::new(context.chaincode_id(), function, args)
            .with_wait_time(self.config.profile.invoke_wait());
        dispatch::invoke_chaincode(&self.transport, context, invocation).await
    }

    async fn ping_chaincode(
        &self,
        context: &SecurityContext<T>,
        chaincode_id: Option<&str>,
    ) -> Result<(), ConnectorError> {
        self.security_check(context)?;

        let invocation = Invocation::new(chaincode_id, PING_FUNCTION, &[]);
        let payload = dispatch::query_chaincode(&self.transport, context, invocation).await?;

        version::check_ping_payload(&payload, &self.config.client_version).inspect_err(|err| {
            if let ConnectorError::VersionMismatch { deployed, client } = err {
                warn!(connection = %self.id, %deployed, %client, "chain-code version mismatch");
            }
        })
    }

    fn security_check(&self, context: &SecurityContext<T>) -> Result<(), ConnectorError> {
        dispatch::security_check(&self.security, self.id, context)
    }
}

impl<T: Transport, S: SecurityCheck> fmt::Debug for Connection<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("profile", &self.config.profile.name)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_id_displays_as_fixed_width_hex() {
        assert_eq!(ConnectionId::from_raw(0xabc).to_string(), "0000000000000abc");
        assert_eq!(ConnectionId::from_raw(42).as_u64(), 42);
    }

    #[test]
    fn random_ids_differ() {
        // 64 random bits; a collision here means the generator is broken
        assert_ne!(ConnectionId::random(), ConnectionId::random());
    }
}
