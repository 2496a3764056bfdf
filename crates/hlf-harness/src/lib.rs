//! Test harness for the ledger session layer.
//!
//! In-memory implementations of the Transport and SecurityCheck seams that
//! record every call, plus a scenario builder that drives a connection
//! through a scripted session and hands the result to an oracle.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod counting_check;
pub mod fake_transport;
pub mod logging;
pub mod scenario;

pub use counting_check::CountingCheck;
pub use fake_transport::{FakeEventHub, FakeMember, FakeTransport, TransportCall};
pub use logging::init_tracing;
pub use scenario::{OracleFn, RunnableScenario, Scenario, Step, StepOutcome, World};
