//! Transport abstraction for the ledger network client.
//!
//! Abstracts over the network client library that performs enrollment,
//! chain-code installation, transaction submission and event subscription.
//! Production wraps the real client, tests use an in-memory fake.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use hlf_proto::{DeployRequest, DeployResponse};
use thiserror::Error;

/// Failure reported by the network client.
///
/// Displays as exactly the client's own message so errors surface to callers
/// unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    /// Wrap a network client failure message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The network client's message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A chain-code call as handed to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invocation<'a> {
    /// Target chain-code, `None` if the context has not been bound yet.
    pub chaincode_id: Option<&'a str>,
    /// Chain-code entry point.
    pub function: &'a str,
    /// Positional arguments for `function`.
    pub args: &'a [String],
    /// Commit wait hint for state-changing calls.
    pub wait_time: Option<Duration>,
}

impl<'a> Invocation<'a> {
    /// Create an invocation with no wait hint.
    pub fn new(chaincode_id: Option<&'a str>, function: &'a str, args: &'a [String]) -> Self {
        Self { chaincode_id, function, args, wait_time: None }
    }

    /// Attach a commit wait hint.
    #[must_use]
    pub fn with_wait_time(mut self, wait_time: Duration) -> Self {
        self.wait_time = Some(wait_time);
        self
    }
}

/// Capability surface of the network client's session handle.
///
/// This trait models the client's chain object:
/// - Enrollment exchanges credentials for an identity handle
/// - One event hub per handle, connected and disconnected explicitly
/// - Deploy, query and invoke are submitted on behalf of an enrolled member
///
/// NOTE: The session layer applies no timeouts of its own. A call that never
/// completes leaves the corresponding operation pending forever, so bounding
/// waits is the implementation's job.
#[async_trait]
pub trait Transport: Send + Sync + 'static {
    /// Identity handle returned by enrollment.
    type Member: Clone + std::fmt::Debug + Send + Sync + 'static;

    /// Handle for ledger event subscription.
    type EventHub: Clone + std::fmt::Debug + Send + Sync + 'static;

    /// Enroll with the membership service.
    async fn enroll(
        &self,
        enrollment_id: &str,
        enrollment_secret: &str,
    ) -> Result<Self::Member, TransportError>;

    /// The event hub this handle publishes ledger events on.
    fn event_hub(&self) -> Self::EventHub;

    /// Subscribe to ledger events at `url`.
    async fn event_hub_connect(&self, url: &str) -> Result<(), TransportError>;

    /// Drop the event subscription.
    async fn event_hub_disconnect(&self) -> Result<(), TransportError>;

    /// Install chain-code and run its initialization entry point.
    async fn deploy(
        &self,
        member: &Self::Member,
        request: &DeployRequest,
    ) -> Result<DeployResponse, TransportError>;

    /// Evaluate a read-only chain-code function.
    async fn query(
        &self,
        member: &Self::Member,
        invocation: Invocation<'_>,
    ) -> Result<Bytes, TransportError>;

    /// Submit a state-changing chain-code transaction.
    async fn invoke(
        &self,
        member: &Self::Member,
        invocation: Invocation<'_>,
    ) -> Result<Bytes, TransportError>;
}
