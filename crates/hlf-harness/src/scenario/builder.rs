//! Scenario builder API.
//!
//! Provides a declarative API for scripting a session and enforcing the
//! Oracle Pattern on its result.

use bytes::Bytes;
use hlf_core::{Connection, ConnectionConfig};
use tracing::debug;

use crate::{
    CountingCheck, FakeTransport,
    scenario::{OracleFn, StepOutcome, World},
};

/// One scripted session operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Subscribe to the profile's event hub
    ConnectEventHub,
    /// Log `member` in with `secret`
    Login {
        /// Enrollment ID, also the key the context is stored under
        member: String,
        /// Enrollment secret
        secret: String,
    },
    /// Deploy with `member`'s context
    Deploy {
        /// Context owner
        member: String,
    },
    /// Ping with `member`'s context
    Ping {
        /// Context owner
        member: String,
    },
    /// Query with `member`'s context
    Query {
        /// Context owner
        member: String,
        /// Entry point
        function: String,
        /// Arguments
        args: Vec<String>,
    },
    /// Invoke with `member`'s context
    Invoke {
        /// Context owner
        member: String,
        /// Entry point
        function: String,
        /// Arguments
        args: Vec<String>,
    },
    /// Disconnect the connection
    Disconnect,
}

/// Scenario builder.
///
/// Script a session by adding steps, then call `.oracle()` to get a
/// [`RunnableScenario`].
pub struct Scenario {
    name: String,
    transport: FakeTransport,
    security: CountingCheck,
    config: ConnectionConfig,
    steps: Vec<Step>,
}

impl Scenario {
    /// Create a new scenario with the given name.
    ///
    /// Runs against a default [`FakeTransport`] and configuration unless
    /// replaced.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transport: FakeTransport::new(),
            security: CountingCheck::new(),
            config: ConnectionConfig::default(),
            steps: Vec::new(),
        }
    }

    /// Run against `transport`.
    pub fn transport(mut self, transport: FakeTransport) -> Self {
        self.transport = transport;
        self
    }

    /// Use `security` as the connection's check.
    pub fn security(mut self, security: CountingCheck) -> Self {
        self.security = security;
        self
    }

    /// Create the connection with `config`.
    pub fn config(mut self, config: ConnectionConfig) -> Self {
        self.config = config;
        self
    }

    /// Add an event hub connect step.
    pub fn connect(mut self) -> Self {
        self.steps.push(Step::ConnectEventHub);
        self
    }

    /// Add a login step.
    pub fn login(mut self, member: impl Into<String>, secret: impl Into<String>) -> Self {
        self.steps.push(Step::Login { member: member.into(), secret: secret.into() });
        self
    }

    /// Add a deploy step.
    pub fn deploy(mut self, member: impl Into<String>) -> Self {
        self.steps.push(Step::Deploy { member: member.into() });
        self
    }

    /// Add a ping step.
    pub fn ping(mut self, member: impl Into<String>) -> Self {
        self.steps.push(Step::Ping { member: member.into() });
        self
    }

    /// Add a query step.
    pub fn query(mut self, member: impl Into<String>, function: impl Into<String>, args: &[&str]) -> Self {
        self.steps.push(Step::Query {
            member: member.into(),
            function: function.into(),
            args: args.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Add an invoke step.
    pub fn invoke(mut self, member: impl Into<String>, function: impl Into<String>, args: &[&str]) -> Self {
        self.steps.push(Step::Invoke {
            member: member.into(),
            function: function.into(),
            args: args.iter().map(ToString::to_string).collect(),
        });
        self
    }

    /// Add a disconnect step.
    pub fn disconnect(mut self) -> Self {
        self.steps.push(Step::Disconnect);
        self
    }

    /// Set the oracle function and return a runnable scenario.
    ///
    /// The oracle is mandatory - you cannot run a scenario without
    /// verification.
    pub fn oracle(self, oracle: OracleFn) -> RunnableScenario {
        RunnableScenario { scenario: self, oracle }
    }
}

/// A scenario with an oracle function that can be executed.
pub struct RunnableScenario {
    scenario: Scenario,
    oracle: OracleFn,
}

impl RunnableScenario {
    /// Execute the scenario.
    ///
    /// Creates one connection over the scenario's transport, runs every step
    /// in order on a current-thread runtime, then invokes the oracle on the
    /// resulting world. A failing step does not stop the scenario; its error
    /// is recorded for the oracle to judge.
    pub fn run(self) -> Result<(), String> {
        let runtime = tokio::runtime::Builder::new_current_thread().build().map_err(|e| {
            format!("Scenario '{}': failed to build runtime: {}", self.scenario.name, e)
        })?;

        let world = runtime.block_on(execute(self.scenario));
        (self.oracle)(&world)
    }
}

async fn execute(scenario: Scenario) -> World {
    let Scenario { name, transport, security, config, steps } = scenario;

    let connection = Connection::with_security_check(transport.clone(), config, security.clone());
    let mut world = World::new(connection.id(), transport, security);

    for step in steps {
        debug!(scenario = %name, ?step, "running step");
        let result = run_step(&connection, &mut world, &step).await;
        world.record(StepOutcome { step, result });
    }

    world.set_connected(connection.is_connected());
    world
}

async fn run_step(
    connection: &Connection<FakeTransport, CountingCheck>,
    world: &mut World,
    step: &Step,
) -> Result<Option<Bytes>, String> {
    match step {
        Step::ConnectEventHub => {
            connection.connect_event_hub().await.map_err(|e| e.to_string())?;
            Ok(None)
        },
        Step::Login { member, secret } => {
            let context = connection.login(member, secret).await.map_err(|e| e.to_string())?;
            world.insert_context(member, context);
            Ok(None)
        },
        Step::Deploy { member } => {
            let context = world.context_mut(member).ok_or_else(|| missing_context(member))?;
            connection.deploy(context).await.map_err(|e| e.to_string())?;
            Ok(None)
        },
        Step::Ping { member } => {
            let context = world.context(member).ok_or_else(|| missing_context(member))?;
            connection.ping(context).await.map_err(|e| e.to_string())?;
            Ok(None)
        },
        Step::Query { member, function, args } => {
            let context = world.context(member).ok_or_else(|| missing_context(member))?;
            connection.query_chaincode(context, function, args).await.map(Some).map_err(|e| e.to_string())
        },
        Step::Invoke { member, function, args } => {
            let context = world.context(member).ok_or_else(|| missing_context(member))?;
            connection.invoke_chaincode(context, function, args).await.map(Some).map_err(|e| e.to_string())
        },
        Step::Disconnect => {
            connection.disconnect().await.map_err(|e| e.to_string())?;
            Ok(None)
        },
    }
}

fn missing_context(member: &str) -> String {
    format!("no security context for {member}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_requires_oracle() {
        // This should compile - oracle provided
        let _scenario = Scenario::new("test").login("alice", "secret").oracle(Box::new(|_world| Ok(())));

        // This should NOT compile - no oracle
        // let scenario = Scenario::new("test").login("alice", "secret");
        // scenario.run(); // ERROR: no method `run` on type `Scenario`
    }

    #[test]
    fn steps_without_context_are_recorded_as_failures() {
        let scenario = Scenario::new("test").ping("nobody").oracle(Box::new(|world| {
            let failures = world.failures();
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].result, Err("no security context for nobody".to_string()));
            assert!(world.transport().calls().is_empty());
            Ok(())
        }));

        scenario.run().expect("scenario should succeed");
    }
}
