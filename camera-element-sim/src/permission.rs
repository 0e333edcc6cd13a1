use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use camera_element_core::PermissionHost;

/// Simulated runtime permission host.
///
/// The "user" answers a prompt through [`SimPermissionHost::set_granted`];
/// the test then forwards the answer to the element the way a real host
/// would (permission result and/or focus regain).
#[derive(Debug)]
pub struct SimPermissionHost {
    granted: AtomicBool,
    can_prompt: AtomicBool,
    prompts: AtomicU32,
}

impl SimPermissionHost {
    /// Permission already granted before the element exists.
    pub fn granted() -> Self {
        Self::with(true, true)
    }

    /// Permission not yet decided; the host can show a prompt.
    pub fn undetermined() -> Self {
        Self::with(false, true)
    }

    /// No permission and no foreground surface to prompt from.
    pub fn headless() -> Self {
        Self::with(false, false)
    }

    fn with(granted: bool, can_prompt: bool) -> Self {
        Self {
            granted: AtomicBool::new(granted),
            can_prompt: AtomicBool::new(can_prompt),
            prompts: AtomicU32::new(0),
        }
    }

    pub fn set_granted(&self, granted: bool) {
        self.granted.store(granted, Ordering::SeqCst);
    }

    /// How many system prompts were shown.
    pub fn prompts(&self) -> u32 {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl PermissionHost for SimPermissionHost {
    fn has_permission(&self) -> bool {
        self.granted.load(Ordering::SeqCst)
    }

    fn can_prompt(&self) -> bool {
        self.can_prompt.load(Ordering::SeqCst)
    }

    fn request_permission(&self) {
        let n = self.prompts.fetch_add(1, Ordering::SeqCst) + 1;
        log::info!("System camera permission prompt shown (#{})", n);
    }
}
