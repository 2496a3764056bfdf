//! Scenario tests with mandatory oracles.
//!
//! A scenario scripts one session's worth of steps against a
//! [`FakeTransport`](crate::FakeTransport), runs them in order on a single
//! connection, and hands the resulting [`World`] to an oracle. A scenario
//! without an oracle cannot be run.

mod builder;
mod world;

pub use builder::{RunnableScenario, Scenario, Step};
pub use world::{StepOutcome, World};

/// Verifies the final state of a scenario.
pub type OracleFn = Box<dyn FnOnce(&World) -> Result<(), String>>;
