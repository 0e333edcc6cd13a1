use parking_lot::Mutex;

use camera_element_core::{ElementDelegate, ElementEvent, ErrorCode, LifecycleState};

/// Delegate that records every state change and event, in order.
#[derive(Debug, Default)]
pub struct EventRecorder {
    states: Mutex<Vec<LifecycleState>>,
    events: Mutex<Vec<ElementEvent>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn states(&self) -> Vec<LifecycleState> {
        self.states.lock().clone()
    }

    /// State names, convenient for transition assertions.
    pub fn state_names(&self) -> Vec<&'static str> {
        self.states.lock().iter().map(LifecycleState::name).collect()
    }

    pub fn events(&self) -> Vec<ElementEvent> {
        self.events.lock().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.lock().iter().filter(|e| e.name() == name).count()
    }

    pub fn error_codes(&self) -> Vec<ErrorCode> {
        self.events
            .lock()
            .iter()
            .filter_map(|e| match e {
                ElementEvent::Error { code, .. } => Some(*code),
                _ => None,
            })
            .collect()
    }

    pub fn last_zoom(&self) -> Option<(f32, f32, f32)> {
        self.events.lock().iter().rev().find_map(|e| match e {
            ElementEvent::ZoomChanged {
                zoom,
                min_zoom,
                max_zoom,
            } => Some((*zoom, *min_zoom, *max_zoom)),
            _ => None,
        })
    }

    pub fn clear(&self) {
        self.states.lock().clear();
        self.events.lock().clear();
    }
}

impl ElementDelegate for EventRecorder {
    fn on_state_changed(&self, state: &LifecycleState) {
        self.states.lock().push(state.clone());
    }

    fn on_event(&self, event: &ElementEvent) {
        log::debug!("event {} {}", event.name(), event.detail());
        self.events.lock().push(event.clone());
    }
}
