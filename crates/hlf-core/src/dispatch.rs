//! Stateless wire-call helpers.
//!
//! Each helper performs exactly one transport call on behalf of a security
//! context and maps the transport's failure onto the matching
//! [`ConnectorError`] variant without touching its message. Ordering the
//! calls and running the security check is the connection's job.

use bytes::Bytes;
use hlf_proto::{DeployRequest, DeployResponse};
use tracing::{debug, warn};

use crate::{
    connection::ConnectionId,
    context::SecurityContext,
    error::ConnectorError,
    security::SecurityCheck,
    transport::{Invocation, Transport},
};

/// Run `check` against `context` for use on `connection`.
pub fn security_check<T: Transport, S: SecurityCheck>(
    check: &S,
    connection: ConnectionId,
    context: &SecurityContext<T>,
) -> Result<(), ConnectorError> {
    check.check(connection, context).map_err(|err| {
        warn!(%connection, issuer = %context.issuer(), error = %err, "security check rejected context");
        ConnectorError::Security(err)
    })
}

/// Install chain-code as `context`'s member.
pub async fn deploy_chaincode<T: Transport>(
    transport: &T,
    context: &SecurityContext<T>,
    request: &DeployRequest,
) -> Result<DeployResponse, ConnectorError> {
    debug!(
        chaincode = %request.chaincode_name,
        function = %request.function,
        "deploying chain-code"
    );
    transport.deploy(context.enrolled_member(), request).await.map_err(ConnectorError::Deployment)
}

/// Evaluate a read-only chain-code function as `context`'s member.
pub async fn query_chaincode<T: Transport>(
    transport: &T,
    context: &SecurityContext<T>,
    invocation: Invocation<'_>,
) -> Result<Bytes, ConnectorError> {
    debug!(
        chaincode_id = ?invocation.chaincode_id,
        function = invocation.function,
        args = invocation.args.len(),
        "querying chain-code"
    );
    transport.query(context.enrolled_member(), invocation).await.map_err(ConnectorError::ChainCode)
}

/// Submit a chain-code transaction as `context`'s member.
pub async fn invoke_chaincode<T: Transport>(
    transport: &T,
    context: &SecurityContext<T>,
    invocation: Invocation<'_>,
) -> Result<Bytes, ConnectorError> {
    debug!(
        chaincode_id = ?invocation.chaincode_id,
        function = invocation.function,
        args = invocation.args.len(),
        "invoking chain-code"
    );
    transport.invoke(context.enrolled_member(), invocation).await.map_err(ConnectorError::ChainCode)
}
