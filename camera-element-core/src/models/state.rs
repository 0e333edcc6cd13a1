use super::error::{BindError, PermissionDenial};

/// Camera permission as tracked by the permission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PermissionState {
    #[default]
    Unknown,
    Granted,
    Denied,
    RequestPending,
}

/// Element lifecycle state machine.
///
/// State transitions:
/// ```text
/// idle → permission_pending → binding → ready
///               ↓                ↓        ↓ (device change)
///             denied           failed   binding
///
/// any → unbound (detach);  unbound → permission_pending (attach)
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    PermissionPending,
    Binding,
    Ready,
    Denied(PermissionDenial),
    Failed(BindError),
    Unbound,
}

impl LifecycleState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::PermissionPending => "permission_pending",
            Self::Binding => "binding",
            Self::Ready => "ready",
            Self::Denied(_) => "denied",
            Self::Failed(_) => "failed",
            Self::Unbound => "unbound",
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// Whether the element is inside an attach cycle.
    pub fn is_attached(&self) -> bool {
        !matches!(self, Self::Idle | Self::Unbound)
    }

    /// Denied and Failed halt automatic progress until the next attach cycle.
    pub fn is_halted(&self) -> bool {
        matches!(self, Self::Denied(_) | Self::Failed(_))
    }
}
