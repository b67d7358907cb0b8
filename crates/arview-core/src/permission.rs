//! One-shot orientation permission gate
//!
//! Some platforms require an explicit user grant before orientation events
//! are delivered. The gate moves through `NotRequested -> Pending ->
//! Granted | Denied` exactly once, or settles straight to `NotRequired`.
//! Nothing here retries: a denial, or a request that never resolves, is final.

use std::fmt;

use tracing::{info, warn};

use crate::error::GateError;

/// Where the permission flow currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    #[default]
    NotRequested,
    Pending,
    Granted,
    Denied,
    /// The platform delivers orientation events without a grant
    NotRequired,
}

impl PermissionState {
    pub fn label(&self) -> &'static str {
        match self {
            PermissionState::NotRequested => "not requested",
            PermissionState::Pending => "pending",
            PermissionState::Granted => "granted",
            PermissionState::Denied => "denied",
            PermissionState::NotRequired => "not required",
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionDecision {
    Granted,
    Denied,
}

/// Three-state permission gate
#[derive(Debug, Clone, Default)]
pub struct PermissionGate {
    state: PermissionState,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PermissionState {
        self.state
    }

    /// Mark the request as issued
    pub fn request(&mut self) -> Result<(), GateError> {
        match self.state {
            PermissionState::NotRequested => {
                self.state = PermissionState::Pending;
                info!("orientation permission requested");
                Ok(())
            }
            other => Err(GateError::AlreadyRequested(other)),
        }
    }

    /// Settle a pending request
    pub fn resolve(&mut self, decision: PermissionDecision) -> Result<(), GateError> {
        if self.state != PermissionState::Pending {
            return Err(GateError::NotPending(self.state));
        }
        self.state = match decision {
            PermissionDecision::Granted => {
                info!("orientation permission granted");
                PermissionState::Granted
            }
            PermissionDecision::Denied => {
                warn!("orientation permission denied; markers will stay hidden");
                PermissionState::Denied
            }
        };
        Ok(())
    }

    /// Settle the gate for platforms that need no grant
    pub fn not_required(&mut self) -> Result<(), GateError> {
        match self.state {
            PermissionState::NotRequested => {
                self.state = PermissionState::NotRequired;
                info!("orientation permission not required on this platform");
                Ok(())
            }
            other => Err(GateError::AlreadyRequested(other)),
        }
    }

    /// Whether orientation samples may be consumed
    pub fn allows_tracking(&self) -> bool {
        matches!(
            self.state,
            PermissionState::Granted | PermissionState::NotRequired
        )
    }
}
