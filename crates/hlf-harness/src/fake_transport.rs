//! In-memory transport.
//!
//! [`FakeTransport`] answers every primitive from scripted state and records
//! each call it receives. Clones share that state, so a test keeps one clone
//! for assertions and moves the other into the connection under test.

use std::{
    collections::{HashMap, VecDeque},
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use async_trait::async_trait;
use bytes::Bytes;
use hlf_core::{Invocation, Transport, TransportError};
use hlf_proto::{DeployRequest, DeployResponse, PingResponse, names::PING_FUNCTION};

/// Identity handle issued by [`FakeTransport::enroll`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeMember {
    /// Enrollment ID the member was issued for
    pub enrollment_id: String,
    /// Position in the transport's enrollment order, starting at 1
    pub serial: u64,
}

/// Event hub handle of a [`FakeTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeEventHub {
    /// Hub name
    pub name: String,
}

/// A primitive call received by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    /// `enroll`
    Enroll {
        /// Enrollment ID
        enrollment_id: String,
        /// Enrollment secret
        enrollment_secret: String,
    },
    /// `event_hub_connect`
    EventHubConnect {
        /// Hub URL
        url: String,
    },
    /// `event_hub_disconnect`
    EventHubDisconnect,
    /// `deploy`
    Deploy {
        /// Submitting member
        member: FakeMember,
        /// Request as received
        request: DeployRequest,
    },
    /// `query`
    Query {
        /// Submitting member
        member: FakeMember,
        /// Target chain-code
        chaincode_id: Option<String>,
        /// Entry point
        function: String,
        /// Arguments
        args: Vec<String>,
    },
    /// `invoke`
    Invoke {
        /// Submitting member
        member: FakeMember,
        /// Target chain-code
        chaincode_id: Option<String>,
        /// Entry point
        function: String,
        /// Arguments
        args: Vec<String>,
        /// Commit wait hint
        wait_time: Option<Duration>,
    },
}

#[derive(Debug)]
struct FakeState {
    calls: Vec<TransportCall>,
    members: Vec<FakeMember>,
    event_hub: FakeEventHub,
    enroll_failure: Option<TransportError>,
    connect_failure: Option<TransportError>,
    disconnect_failure: Option<TransportError>,
    deploy_failure: Option<TransportError>,
    chaincode_ids: VecDeque<String>,
    deployed: u64,
    chaincode_version: String,
    ping_payload: Option<Bytes>,
    query_results: HashMap<String, Result<Bytes, TransportError>>,
    invoke_results: HashMap<String, Result<Bytes, TransportError>>,
}

/// Scripted, call-recording [`Transport`].
///
/// Defaults: enrollment succeeds, deploys hand out `chaincode-1`,
/// `chaincode-2`, ..., ping reports [`hlf_core::CLIENT_VERSION`], and every
/// other query or invoke answers with empty bytes.
#[derive(Debug, Clone)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeTransport {
    /// Create a transport with default answers.
    pub fn new() -> Self {
        let state = FakeState {
            calls: Vec::new(),
            members: Vec::new(),
            event_hub: FakeEventHub { name: "eventhub".to_string() },
            enroll_failure: None,
            connect_failure: None,
            disconnect_failure: None,
            deploy_failure: None,
            chaincode_ids: VecDeque::new(),
            deployed: 0,
            chaincode_version: hlf_core::CLIENT_VERSION.to_string(),
            ping_payload: None,
            query_results: HashMap::new(),
            invoke_results: HashMap::new(),
        };
        Self { state: Arc::new(Mutex::new(state)) }
    }

    fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Name the event hub handle.
    #[must_use]
    pub fn with_event_hub(self, name: impl Into<String>) -> Self {
        self.state().event_hub = FakeEventHub { name: name.into() };
        self
    }

    /// Fail every enrollment with `message`.
    #[must_use]
    pub fn failing_enrollment(self, message: impl Into<String>) -> Self {
        self.state().enroll_failure = Some(TransportError::new(message));
        self
    }

    /// Fail event hub connects with `message`.
    #[must_use]
    pub fn failing_event_hub_connect(self, message: impl Into<String>) -> Self {
        self.state().connect_failure = Some(TransportError::new(message));
        self
    }

    /// Fail event hub disconnects with `message`.
    #[must_use]
    pub fn failing_event_hub_disconnect(self, message: impl Into<String>) -> Self {
        self.state().disconnect_failure = Some(TransportError::new(message));
        self
    }

    /// Fail every deploy with `message`.
    #[must_use]
    pub fn failing_deploy(self, message: impl Into<String>) -> Self {
        self.state().deploy_failure = Some(TransportError::new(message));
        self
    }

    /// Hand out `chaincode_id` on the next deploy.
    #[must_use]
    pub fn with_chaincode_id(self, chaincode_id: impl Into<String>) -> Self {
        self.state().chaincode_ids.push_back(chaincode_id.into());
        self
    }

    /// Version reported by ping.
    #[must_use]
    pub fn with_chaincode_version(self, version: impl Into<String>) -> Self {
        self.state().chaincode_version = version.into();
        self
    }

    /// Raw bytes returned by ping, replacing the encoded version.
    #[must_use]
    pub fn with_ping_payload(self, payload: impl Into<Bytes>) -> Self {
        self.state().ping_payload = Some(payload.into());
        self
    }

    /// Answer queries of `function` with `result`.
    #[must_use]
    pub fn with_query_result(
        self,
        function: impl Into<String>,
        result: Result<Bytes, TransportError>,
    ) -> Self {
        self.state().query_results.insert(function.into(), result);
        self
    }

    /// Answer invokes of `function` with `result`.
    #[must_use]
    pub fn with_invoke_result(
        self,
        function: impl Into<String>,
        result: Result<Bytes, TransportError>,
    ) -> Self {
        self.state().invoke_results.insert(function.into(), result);
        self
    }

    /// Change the version reported by ping on a transport already in use.
    pub fn set_chaincode_version(&self, version: impl Into<String>) {
        self.state().chaincode_version = version.into();
    }

    /// Every call received, in order.
    pub fn calls(&self) -> Vec<TransportCall> {
        self.state().calls.clone()
    }

    /// Number of calls matching `predicate`.
    pub fn count_calls(&self, predicate: impl Fn(&TransportCall) -> bool) -> usize {
        self.state().calls.iter().filter(|call| predicate(*call)).count()
    }

    /// Number of `event_hub_disconnect` calls received.
    pub fn event_hub_disconnects(&self) -> usize {
        self.count_calls(|call| matches!(call, TransportCall::EventHubDisconnect))
    }

    /// Members issued so far, in enrollment order.
    pub fn members(&self) -> Vec<FakeMember> {
        self.state().members.clone()
    }

    /// The event hub handle this transport hands out.
    pub fn event_hub_handle(&self) -> FakeEventHub {
        self.state().event_hub.clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    type Member = FakeMember;
    type EventHub = FakeEventHub;

    async fn enroll(
        &self,
        enrollment_id: &str,
        enrollment_secret: &str,
    ) -> Result<FakeMember, TransportError> {
        let mut state = self.state();
        state.calls.push(TransportCall::Enroll {
            enrollment_id: enrollment_id.to_string(),
            enrollment_secret: enrollment_secret.to_string(),
        });

        if let Some(err) = &state.enroll_failure {
            return Err(err.clone());
        }

        let serial = state.members.len() as u64 + 1;
        let member = FakeMember { enrollment_id: enrollment_id.to_string(), serial };
        state.members.push(member.clone());
        Ok(member)
    }

    fn event_hub(&self) -> FakeEventHub {
        self.event_hub_handle()
    }

    async fn event_hub_connect(&self, url: &str) -> Result<(), TransportError> {
        let mut state = self.state();
        state.calls.push(TransportCall::EventHubConnect { url: url.to_string() });
        state.connect_failure.clone().map_or(Ok(()), Err)
    }

    async fn event_hub_disconnect(&self) -> Result<(), TransportError> {
        let mut state = self.state();
        state.calls.push(TransportCall::EventHubDisconnect);
        state.disconnect_failure.clone().map_or(Ok(()), Err)
    }

    async fn deploy(
        &self,
        member: &FakeMember,
        request: &DeployRequest,
    ) -> Result<DeployResponse, TransportError> {
        let mut state = self.state();
        state.calls.push(TransportCall::Deploy { member: member.clone(), request: request.clone() });

        if let Some(err) = &state.deploy_failure {
            return Err(err.clone());
        }

        state.deployed += 1;
        let scripted = state.chaincode_ids.pop_front();
        let chaincode_id = scripted.unwrap_or_else(|| format!("chaincode-{}", state.deployed));
        Ok(DeployResponse::new(chaincode_id))
    }

    async fn query(
        &self,
        member: &FakeMember,
        invocation: Invocation<'_>,
    ) -> Result<Bytes, TransportError> {
        let mut state = self.state();
        state.calls.push(TransportCall::Query {
            member: member.clone(),
            chaincode_id: invocation.chaincode_id.map(str::to_string),
            function: invocation.function.to_string(),
            args: invocation.args.to_vec(),
        });

        if let Some(result) = state.query_results.get(invocation.function) {
            return result.clone();
        }
        if invocation.function == PING_FUNCTION {
            if let Some(payload) = &state.ping_payload {
                return Ok(payload.clone());
            }
            return PingResponse::new(state.chaincode_version.clone())
                .to_bytes()
                .map_err(|err| TransportError::new(err.to_string()));
        }
        Ok(Bytes::new())
    }

    async fn invoke(
        &self,
        member: &FakeMember,
        invocation: Invocation<'_>,
    ) -> Result<Bytes, TransportError> {
        let mut state = self.state();
        state.calls.push(TransportCall::Invoke {
            member: member.clone(),
            chaincode_id: invocation.chaincode_id.map(str::to_string),
            function: invocation.function.to_string(),
            args: invocation.args.to_vec(),
            wait_time: invocation.wait_time,
        });

        state.invoke_results.get(invocation.function).cloned().unwrap_or_else(|| Ok(Bytes::new()))
    }
}
