//! World state for scenario execution.
//!
//! The World holds the security contexts issued during a scenario, the
//! outcome of every step, and the transport and security check the
//! connection ran against, for oracles to inspect.

use std::collections::HashMap;

use bytes::Bytes;
use hlf_core::{ConnectionId, SecurityContext};

use crate::{CountingCheck, FakeTransport, scenario::Step};

/// What a step returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    /// The step that ran
    pub step: Step,
    /// Returned bytes for query/invoke, `None` for the other steps; the
    /// error's display text on failure
    pub result: Result<Option<Bytes>, String>,
}

/// World state after a scenario ran.
pub struct World {
    connection_id: ConnectionId,
    contexts: HashMap<String, SecurityContext<FakeTransport>>,
    outcomes: Vec<StepOutcome>,
    transport: FakeTransport,
    security: CountingCheck,
    connected: bool,
}

impl World {
    pub(crate) fn new(
        connection_id: ConnectionId,
        transport: FakeTransport,
        security: CountingCheck,
    ) -> Self {
        Self {
            connection_id,
            contexts: HashMap::new(),
            outcomes: Vec::new(),
            transport,
            security,
            connected: false,
        }
    }

    pub(crate) fn insert_context(&mut self, member: &str, context: SecurityContext<FakeTransport>) {
        self.contexts.insert(member.to_string(), context);
    }

    pub(crate) fn context_mut(&mut self, member: &str) -> Option<&mut SecurityContext<FakeTransport>> {
        self.contexts.get_mut(member)
    }

    pub(crate) fn record(&mut self, outcome: StepOutcome) {
        self.outcomes.push(outcome);
    }

    pub(crate) fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    /// Identifier of the connection the scenario ran on.
    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Security context issued to `member`, if its login succeeded.
    pub fn context(&self, member: &str) -> Option<&SecurityContext<FakeTransport>> {
        self.contexts.get(member)
    }

    /// Every step outcome, in execution order.
    pub fn outcomes(&self) -> &[StepOutcome] {
        &self.outcomes
    }

    /// Outcomes that failed.
    pub fn failures(&self) -> Vec<&StepOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.result.is_err()).collect()
    }

    /// Transport the connection ran against.
    pub fn transport(&self) -> &FakeTransport {
        &self.transport
    }

    /// Security checks run during the scenario.
    pub fn security_checks(&self) -> usize {
        self.security.checks()
    }

    /// Whether the connection was still connected when the scenario ended.
    pub fn connected(&self) -> bool {
        self.connected
    }
}
