use crate::models::error::PermissionDenial;
use crate::models::state::PermissionState;
use crate::traits::permission_host::PermissionHost;

/// Outcome of [`PermissionGate::check_or_request`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionOutcome {
    Granted,
    DeniedFinal(PermissionDenial),
    /// A prompt is outstanding; wait for a host result or focus regain.
    RequestStarted,
}

/// Tracks camera permission and at most one outstanding prompt.
///
/// The gate outlives attach cycles, so a user who denied once is not
/// prompted again until the denial is explicitly cleared.
#[derive(Debug, Default)]
pub struct PermissionGate {
    state: PermissionState,
    /// Host-reported result for the outstanding prompt, consumed once.
    reported: Option<bool>,
    prompts_shown: u32,
}

impl PermissionGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PermissionState {
        self.state
    }

    pub fn is_request_pending(&self) -> bool {
        self.state == PermissionState::RequestPending
    }

    /// Number of system prompts this gate has triggered.
    pub fn prompts_shown(&self) -> u32 {
        self.prompts_shown
    }

    /// Whether access is granted right now. Read-only: the gate's state
    /// only moves through `check_or_request` and the prompt-result calls.
    pub fn is_granted(&self, host: &dyn PermissionHost) -> bool {
        host.has_permission()
    }

    /// Sync the tracked state with the host's current answer.
    fn refresh(&mut self, host: &dyn PermissionHost) -> bool {
        if host.has_permission() {
            self.state = PermissionState::Granted;
            self.reported = None;
            true
        } else {
            if self.state == PermissionState::Granted {
                log::warn!("Camera permission revoked by host");
                self.state = PermissionState::Unknown;
            }
            false
        }
    }

    /// Check permission, prompting at most once per pending cycle.
    ///
    /// Calling this repeatedly with no intervening host event returns the
    /// same outcome and never shows a second prompt.
    pub fn check_or_request(&mut self, host: &dyn PermissionHost) -> PermissionOutcome {
        if self.refresh(host) {
            return PermissionOutcome::Granted;
        }

        match self.state {
            PermissionState::Denied => PermissionOutcome::DeniedFinal(PermissionDenial::UserDenied),
            PermissionState::RequestPending => match self.reported.take() {
                Some(true) => {
                    log::info!("Camera permission granted by user");
                    self.state = PermissionState::Granted;
                    PermissionOutcome::Granted
                }
                Some(false) => {
                    log::warn!("Camera permission denied by user");
                    self.state = PermissionState::Denied;
                    PermissionOutcome::DeniedFinal(PermissionDenial::UserDenied)
                }
                None => PermissionOutcome::RequestStarted,
            },
            // refresh() already demoted a revoked grant to Unknown
            PermissionState::Unknown | PermissionState::Granted => {
                if !host.can_prompt() {
                    log::warn!("Camera permission missing and host has no prompt surface");
                    return PermissionOutcome::DeniedFinal(PermissionDenial::NoPromptSurface);
                }
                log::info!("Requesting camera runtime permission");
                self.state = PermissionState::RequestPending;
                self.reported = None;
                self.prompts_shown += 1;
                host.request_permission();
                PermissionOutcome::RequestStarted
            }
        }
    }

    /// Record the host's answer to the outstanding prompt.
    ///
    /// Ignored when no prompt is outstanding.
    pub fn record_result(&mut self, granted: bool) {
        if self.state != PermissionState::RequestPending {
            log::debug!("Ignoring permission result {} with no prompt outstanding", granted);
            return;
        }
        self.reported = Some(granted);
    }

    /// Treat the host's current permission as the answer to the outstanding
    /// prompt, unless the host already reported one.
    ///
    /// Used when the host regains focus after the system dialog closed.
    pub fn settle_pending(&mut self, host: &dyn PermissionHost) {
        if self.state == PermissionState::RequestPending && self.reported.is_none() {
            self.reported = Some(host.has_permission());
        }
    }

    /// Forget a final denial so the next check may prompt again.
    pub fn clear_denial(&mut self) {
        if self.state == PermissionState::Denied {
            log::info!("Camera permission denial cleared");
            self.state = PermissionState::Unknown;
        }
    }
}
