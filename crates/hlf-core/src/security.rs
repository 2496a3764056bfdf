//! Security check hook.
//!
//! Every privileged operation runs a [`SecurityCheck`] against the presented
//! context before any transport call. A rejection becomes the operation's
//! failure and nothing is sent to the network.

use crate::{
    connection::ConnectionId, context::SecurityContext, error::SecurityError, transport::Transport,
};

/// Decides whether a security context may be used on a connection.
///
/// Implementations must be stateless with respect to the connection: the
/// same context presented twice gets the same answer.
pub trait SecurityCheck: Send + Sync + 'static {
    /// Accept or reject `context` for use on `connection`.
    fn check<T: Transport>(
        &self,
        connection: ConnectionId,
        context: &SecurityContext<T>,
    ) -> Result<(), SecurityError>;
}

/// Default check: a context is only valid on the connection that issued it.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssuerCheck;

impl SecurityCheck for IssuerCheck {
    fn check<T: Transport>(
        &self,
        connection: ConnectionId,
        context: &SecurityContext<T>,
    ) -> Result<(), SecurityError> {
        if context.issuer() != connection {
            return Err(SecurityError::ForeignContext { connection, issuer: context.issuer() });
        }
        Ok(())
    }
}
