//! Wire types exchanged with deployed chain-code.
//!
//! The session layer only speaks to chain-code through a handful of
//! well-known entry points. This crate holds the names of those entry points
//! and the payloads that cross them: the deploy request the transport turns
//! into an install transaction, the deploy response carrying the fresh
//! chain-code identifier, and the JSON document returned by `ping`.
//!
//! Everything else a chain-code function returns is opaque bytes to this
//! layer and never decoded here.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod deploy;
pub mod errors;
pub mod names;
pub mod ping;

pub use deploy::{DeployRequest, DeployResponse};
pub use errors::{ProtocolError, Result};
pub use ping::PingResponse;
