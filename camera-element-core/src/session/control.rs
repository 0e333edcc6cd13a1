use crate::models::config::{DeviceSelector, ElementConfig, FlashMode, FocusMode};
use crate::models::events::ElementEvent;
use crate::models::hardware::{CaptureFlash, MeteringPoint, PreviewSurface};
use crate::session::binder::SessionHandle;

/// Owns the declared [`ElementConfig`] and pushes it onto the bound device.
///
/// Every setter records the new value first and then applies it best-effort:
/// with no session the hardware apply is skipped silently, since setting
/// props before the camera is ready is the normal order in a declarative
/// tree. After each bind, [`ControlApplier::reapply`] writes the full state
/// so hardware never drifts from the declared config.
#[derive(Debug, Default)]
pub struct ControlApplier {
    config: ElementConfig,
}

impl ControlApplier {
    pub fn new(config: ElementConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ElementConfig {
        &self.config
    }

    /// Returns the `zoomchanged` event when the zoom reached hardware.
    pub fn set_zoom(&mut self, zoom: f32, session: Option<&SessionHandle>) -> Option<ElementEvent> {
        if !zoom.is_finite() {
            log::warn!("Ignoring non-finite zoom {}", zoom);
            return None;
        }
        self.config.zoom = zoom;
        session.and_then(|s| self.apply_zoom(s))
    }

    pub fn set_flash(&mut self, mode: FlashMode, session: Option<&SessionHandle>) {
        self.config.flash_mode = mode;
        if let Some(session) = session {
            self.apply_flash(session);
            self.apply_torch(session);
        }
    }

    pub fn set_torch(&mut self, enabled: bool, session: Option<&SessionHandle>) {
        self.config.enable_torch = enabled;
        if let Some(session) = session {
            self.apply_torch(session);
        }
    }

    pub fn set_focus_mode(&mut self, mode: FocusMode) {
        self.config.focus_mode = mode;
    }

    /// Returns `true` when the selector actually changed.
    pub fn set_device(&mut self, device: DeviceSelector) -> bool {
        if self.config.device == device {
            return false;
        }
        self.config.device = device;
        true
    }

    /// Touch-down handling is armed only in `tap` focus mode.
    pub fn tap_focus_armed(&self) -> bool {
        self.config.focus_mode == FocusMode::Tap
    }

    /// One-shot focus-and-meter at view-local `(x, y)`.
    ///
    /// Returns `false` when there was no session to apply it to.
    pub fn trigger_focus(
        &self,
        x: f32,
        y: f32,
        surface: &PreviewSurface,
        session: Option<&SessionHandle>,
    ) -> bool {
        let Some(session) = session else {
            log::debug!("trigger_focus() skipped, no session");
            return false;
        };
        let point = MeteringPoint::from_view(x, y, surface);
        session.device().start_focus_and_metering(point);
        true
    }

    /// Write zoom, flash and torch, in that order, to a fresh session.
    pub fn reapply(&self, session: &SessionHandle) -> Vec<ElementEvent> {
        let mut events = Vec::new();
        events.extend(self.apply_zoom(session));
        self.apply_flash(session);
        self.apply_torch(session);
        events
    }

    fn apply_zoom(&self, session: &SessionHandle) -> Option<ElementEvent> {
        let device = session.device();
        let Some(range) = device.zoom_range() else {
            log::debug!("apply_zoom() skipped, zoom range not reported yet");
            return None;
        };
        let clamped = range.clamp(self.config.zoom);
        device.set_zoom_ratio(clamped);
        Some(ElementEvent::ZoomChanged {
            zoom: clamped,
            min_zoom: range.min,
            max_zoom: range.max,
        })
    }

    fn apply_flash(&self, session: &SessionHandle) {
        session
            .device()
            .set_capture_flash(CaptureFlash::from(self.config.flash_mode));
    }

    fn apply_torch(&self, session: &SessionHandle) {
        session.device().enable_torch(self.config.torch_on());
    }
}
