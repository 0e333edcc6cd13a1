use crate::models::events::ElementEvent;
use crate::models::state::LifecycleState;

/// Receiver for element notifications.
///
/// Called on the element's main context, never from a platform callback
/// thread.
pub trait ElementDelegate: Send + Sync {
    /// Called on every lifecycle transition.
    fn on_state_changed(&self, state: &LifecycleState);

    /// Called for every boundary event (`cameraready`, `zoomchanged`, ...).
    fn on_event(&self, event: &ElementEvent);
}
