use std::sync::atomic::{AtomicBool, Ordering};

use camera_element_core::LifecycleScope;

/// Simulated host lifecycle owner (an activity-like scope).
#[derive(Debug)]
pub struct SimLifecycleScope {
    name: String,
    active: AtomicBool,
}

impl SimLifecycleScope {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            active: AtomicBool::new(true),
        }
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }
}

impl LifecycleScope for SimLifecycleScope {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}
