//! Error types for the session layer.

use std::path::PathBuf;

use hlf_proto::ProtocolError;
use thiserror::Error;

use crate::{connection::ConnectionId, transport::TransportError};

/// Caller-supplied credentials rejected before any network interaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Enrollment ID was empty
    #[error("enrollmentID not specified")]
    MissingEnrollmentId,

    /// Enrollment secret was empty
    #[error("enrollmentSecret not specified")]
    MissingEnrollmentSecret,
}

/// Security context refused by a security check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SecurityError {
    /// Context was issued by a different connection
    #[error("security context issued by connection {issuer} presented to connection {connection}")]
    ForeignContext {
        /// Connection the context was presented to
        connection: ConnectionId,
        /// Connection that issued the context
        issuer: ConnectionId,
    },

    /// Rejected by a custom check
    #[error("security check rejected context: {0}")]
    Rejected(String),
}

/// Errors surfaced by [`Connection`](crate::Connection) operations.
///
/// Transport failures keep the network client's message as their display
/// text; only [`ConnectorError::VersionMismatch`] carries a message built by
/// this layer.
#[derive(Debug, Error)]
pub enum ConnectorError {
    /// Credentials failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Security check refused the context
    #[error(transparent)]
    Security(#[from] SecurityError),

    /// Membership service rejected enrollment
    #[error(transparent)]
    Enrollment(TransportError),

    /// Chain-code installation failed
    #[error(transparent)]
    Deployment(TransportError),

    /// Deployed chain-code reports a different version than this client
    #[error("Deployed chain-code ({deployed}) is incompatible with client ({client})")]
    VersionMismatch {
        /// Version reported by the chain-code
        deployed: String,
        /// This client's version
        client: String,
    },

    /// Query or invoke failed
    #[error(transparent)]
    ChainCode(TransportError),

    /// Ping answered with something that is not a ping payload
    #[error("invalid ping response: {0}")]
    InvalidPingResponse(#[source] ProtocolError),

    /// Event hub subscribe or unsubscribe failed
    #[error(transparent)]
    EventHub(TransportError),
}

/// Errors loading a connection profile.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Profile file could not be read
    #[error("failed to read connection profile {}: {source}", .path.display())]
    Io {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Profile was not valid JSON or had the wrong shape
    #[error("invalid connection profile: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required endpoint was empty
    #[error("connection profile field {0} not specified")]
    MissingField(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_failures_display_verbatim() {
        let err = ConnectorError::Enrollment(TransportError::new("such error"));
        assert_eq!(err.to_string(), "such error");

        let err = ConnectorError::ChainCode(TransportError::new("peer unavailable"));
        assert_eq!(err.to_string(), "peer unavailable");
    }

    #[test]
    fn version_mismatch_message() {
        let err = ConnectorError::VersionMismatch {
            deployed: "2016.12.25".to_string(),
            client: "1.0.0".to_string(),
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"Deployed chain-code (2016.12.25) is incompatible with client (1.0.0)"
        );
    }

    #[test]
    fn validation_messages() {
        assert_eq!(ValidationError::MissingEnrollmentId.to_string(), "enrollmentID not specified");
        assert_eq!(
            ConnectorError::from(ValidationError::MissingEnrollmentSecret).to_string(),
            "enrollmentSecret not specified"
        );
    }

    #[test]
    fn foreign_context_names_both_connections() {
        let err = SecurityError::ForeignContext {
            connection: ConnectionId::from_raw(1),
            issuer: ConnectionId::from_raw(0xff),
        };
        insta::assert_snapshot!(
            err.to_string(),
            @"security context issued by connection 00000000000000ff presented to connection 0000000000000001"
        );
    }
}
