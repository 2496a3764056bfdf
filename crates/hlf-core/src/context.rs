//! Security context.
//!
//! The bundle an enrolled caller presents to every privileged operation:
//! the identity handle from enrollment, the event hub it was enrolled
//! against, and once deployed, the chain-code it targets. Contexts are
//! created only by [`Connection::login`](crate::Connection::login) and only
//! [`Connection::deploy`](crate::Connection::deploy) changes them.

use std::fmt;

use crate::{connection::ConnectionId, transport::Transport};

/// Capability token returned by login.
pub struct SecurityContext<T: Transport> {
    /// Connection that issued this context
    issuer: ConnectionId,
    /// Identity handle from enrollment
    enrolled_member: T::Member,
    /// Event subscription handle captured at enrollment
    event_hub: T::EventHub,
    /// Deployed chain-code, bound by deploy
    chaincode_id: Option<String>,
}

impl<T: Transport> SecurityContext<T> {
    pub(crate) fn new(issuer: ConnectionId, enrolled_member: T::Member, event_hub: T::EventHub) -> Self {
        Self { issuer, enrolled_member, event_hub, chaincode_id: None }
    }

    /// Connection that issued this context.
    pub fn issuer(&self) -> ConnectionId {
        self.issuer
    }

    /// Identity handle returned by enrollment.
    pub fn enrolled_member(&self) -> &T::Member {
        &self.enrolled_member
    }

    /// Event hub captured at enrollment.
    pub fn event_hub(&self) -> &T::EventHub {
        &self.event_hub
    }

    /// Chain-code this context targets, if deployed.
    pub fn chaincode_id(&self) -> Option<&str> {
        self.chaincode_id.as_deref()
    }

    /// Bind a deployed chain-code, returning any previous binding.
    pub(crate) fn bind_chaincode(&mut self, chaincode_id: String) -> Option<String> {
        self.chaincode_id.replace(chaincode_id)
    }
}

impl<T: Transport> Clone for SecurityContext<T> {
    fn clone(&self) -> Self {
        Self {
            issuer: self.issuer,
            enrolled_member: self.enrolled_member.clone(),
            event_hub: self.event_hub.clone(),
            chaincode_id: self.chaincode_id.clone(),
        }
    }
}

impl<T: Transport> fmt::Debug for SecurityContext<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecurityContext")
            .field("issuer", &self.issuer)
            .field("enrolled_member", &self.enrolled_member)
            .field("event_hub", &self.event_hub)
            .field("chaincode_id", &self.chaincode_id)
            .finish()
    }
}
