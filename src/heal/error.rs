// ABOUTME: Error types for the heal sequence.
// ABOUTME: Status lookup, restart invocation and restart lease failures.

use chrono::{DateTime, Utc};

use crate::platform::PlatformError;

/// Fatal errors of a heal run. Probe failures and verification timeouts
/// are results, not errors.
#[derive(Debug, thiserror::Error)]
pub enum HealError {
    /// Could not read the container group state before deciding.
    #[error("failed to get container group status: {0}")]
    StatusLookup(#[source] PlatformError),

    /// The restart call failed or timed out.
    #[error("container restart failed: {0}")]
    RestartInvocation(#[source] PlatformError),

    /// Another invocation holds the restart lease.
    #[error("restart of {resource} already in progress: lease held by {holder} (pid {pid}) since {started_at}")]
    LeaseHeld {
        resource: String,
        holder: String,
        pid: u32,
        started_at: DateTime<Utc>,
    },

    /// The lease file could not be created or read.
    #[error("restart lease error: {0}")]
    Lease(String),
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealErrorKind {
    StatusLookup,
    RestartInvocation,
    LeaseHeld,
    Lease,
}

/// Who holds a restart lease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaseHolderInfo {
    pub holder: String,
    pub pid: u32,
    pub started_at: DateTime<Utc>,
}

impl HealError {
    pub(crate) fn lease_error(message: impl Into<String>) -> Self {
        HealError::Lease(message.into())
    }

    pub fn kind(&self) -> HealErrorKind {
        match self {
            HealError::StatusLookup(_) => HealErrorKind::StatusLookup,
            HealError::RestartInvocation(_) => HealErrorKind::RestartInvocation,
            HealError::LeaseHeld { .. } => HealErrorKind::LeaseHeld,
            HealError::Lease(_) => HealErrorKind::Lease,
        }
    }

    /// Holder details when the lease is held elsewhere.
    pub fn lease_holder(&self) -> Option<LeaseHolderInfo> {
        match self {
            HealError::LeaseHeld {
                holder,
                pid,
                started_at,
                ..
            } => Some(LeaseHolderInfo {
                holder: holder.clone(),
                pid: *pid,
                started_at: *started_at,
            }),
            _ => None,
        }
    }
}
