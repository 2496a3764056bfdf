//! Security check that counts invocations.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use hlf_core::{ConnectionId, IssuerCheck, SecurityCheck, SecurityContext, SecurityError, Transport};

/// Wraps [`IssuerCheck`] and counts how often it runs.
///
/// Clones share the counter, so a test can keep one clone and hand the
/// other to the connection.
#[derive(Debug, Clone, Default)]
pub struct CountingCheck {
    checks: Arc<AtomicUsize>,
    rejection: Option<String>,
}

impl CountingCheck {
    /// Count checks and defer to the issuer check.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count checks and reject every context with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self { checks: Arc::default(), rejection: Some(reason.into()) }
    }

    /// Number of checks run so far.
    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }
}

impl SecurityCheck for CountingCheck {
    fn check<T: Transport>(
        &self,
        connection: ConnectionId,
        context: &SecurityContext<T>,
    ) -> Result<(), SecurityError> {
        self.checks.fetch_add(1, Ordering::SeqCst);

        if let Some(reason) = &self.rejection {
            return Err(SecurityError::Rejected(reason.clone()));
        }
        IssuerCheck.check(connection, context)
    }
}
