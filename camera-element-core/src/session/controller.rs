use std::sync::Arc;
use std::time::Duration;

use crate::dispatch::generation::{Generation, GenerationCounter};
use crate::dispatch::main_queue::{MainHandle, MainMessage, MainQueue};
use crate::element::focus_ring::FocusRing;
use crate::models::config::{DeviceSelector, ElementConfig, ElementOptions, FlashMode, FocusMode};
use crate::models::error::{BindError, CaptureError, ElementError, ErrorCode};
use crate::models::events::ElementEvent;
use crate::models::hardware::PreviewSurface;
use crate::models::state::{LifecycleState, PermissionState};
use crate::permission::gate::{PermissionGate, PermissionOutcome};
use crate::session::binder::{SessionHandle, UseCaseBinder};
use crate::session::capture::{CaptureCoordinator, CaptureReply, CaptureTicket};
use crate::session::control::ControlApplier;
use crate::session::provider::{Acquire, HardwareSessionProvider};
use crate::storage::output::OutputLocation;
use crate::traits::element_delegate::ElementDelegate;
use crate::traits::lifecycle_scope::LifecycleScope;
use crate::traits::permission_host::PermissionHost;
use crate::traits::provider_source::{CameraProvider, ProviderSource};

/// Host collaborators handed to an element at construction.
#[derive(Clone)]
pub struct PlatformBindings {
    pub permission_host: Arc<dyn PermissionHost>,
    pub provider_source: Arc<dyn ProviderSource>,
    /// `None` when the host has no lifecycle scope to offer; binding then
    /// fails with `NoLifecycleOwner`.
    pub lifecycle_scope: Option<Arc<dyn LifecycleScope>>,
}

/// Top-level camera element state machine.
///
/// Owns the session and every transition. Runs on the element's main
/// context: platform completions arrive as [`MainMessage`]s and are applied
/// by [`LifecycleController::run_pending`], after checking they still belong
/// to the current attach cycle or session.
///
/// ```text
/// attach → [PermissionGate] → [HardwareSessionProvider] → [UseCaseBinder]
///        → [ControlApplier::reapply] → ready
/// ```
pub struct LifecycleController {
    state: LifecycleState,
    permission_host: Arc<dyn PermissionHost>,
    scope: Option<Arc<dyn LifecycleScope>>,
    gate: PermissionGate,
    provider: HardwareSessionProvider,
    binder: UseCaseBinder,
    controls: ControlApplier,
    capture: CaptureCoordinator,
    focus_ring: FocusRing,
    surface: PreviewSurface,

    session: Option<SessionHandle>,
    provider_handle: Option<Arc<dyn CameraProvider>>,

    // Attach cycles; `awaiting_provider` names the cycle parked in Binding.
    cycles: GenerationCounter,
    awaiting_provider: Option<Generation>,

    delegate: Option<Arc<dyn ElementDelegate>>,
    main: MainQueue,
}

impl LifecycleController {
    pub fn new(bindings: PlatformBindings, options: ElementOptions) -> Result<Self, ElementError> {
        options.validate().map_err(ElementError::InvalidOptions)?;

        let main = MainQueue::new();
        let mut provider = HardwareSessionProvider::new(bindings.provider_source);
        if options.prewarm_provider && bindings.permission_host.has_permission() {
            provider.prewarm(&main.handle());
        }

        Ok(Self {
            state: LifecycleState::Idle,
            permission_host: bindings.permission_host,
            scope: bindings.lifecycle_scope,
            gate: PermissionGate::new(),
            provider,
            binder: UseCaseBinder::new(),
            controls: ControlApplier::default(),
            capture: CaptureCoordinator::new(OutputLocation::new(
                options.output_directory,
                options.file_prefix,
            )),
            focus_ring: FocusRing::new(options.focus_ring_duration),
            surface: PreviewSurface::new("camera-preview"),
            session: None,
            provider_handle: None,
            cycles: GenerationCounter::new(),
            awaiting_provider: None,
            delegate: None,
            main,
        })
    }

    pub fn set_delegate(&mut self, delegate: Arc<dyn ElementDelegate>) {
        self.delegate = Some(delegate);
    }

    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    pub fn config(&self) -> &ElementConfig {
        self.controls.config()
    }

    pub fn permission_state(&self) -> PermissionState {
        self.gate.state()
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_capturing(&self) -> bool {
        self.capture.is_busy()
    }

    pub fn focus_ring(&self) -> &FocusRing {
        &self.focus_ring
    }

    pub fn surface(&self) -> &PreviewSurface {
        &self.surface
    }

    /// Number of platform provider acquisitions started so far.
    pub fn provider_requests(&self) -> u32 {
        self.provider.requests_started()
    }

    /// Handle for posting into this element's main context.
    pub fn main_handle(&self) -> MainHandle {
        self.main.handle()
    }

    // --- Host lifecycle ---

    /// `Idle | Unbound --attach--> PermissionPending`.
    pub fn attach(&mut self) {
        if self.state.is_attached() {
            log::debug!("attach() ignored, already attached ({})", self.state.name());
            return;
        }
        let cycle = self.cycles.advance();
        log::info!("attach() — starting camera, cycle {}", cycle.value());
        self.set_state(LifecycleState::PermissionPending);
        self.evaluate_permission();
    }

    /// `any --detach--> Unbound`. Idempotent.
    ///
    /// Outstanding platform futures are not cancelled; their completions
    /// fail the cycle/session checks and are dropped.
    pub fn detach(&mut self) {
        if self.state == LifecycleState::Unbound {
            log::debug!("detach() ignored, already unbound");
            return;
        }
        log::info!("detach() — stopping camera");
        self.cycles.advance();
        self.awaiting_provider = None;
        self.capture.abort("camera detached");
        self.session = None;
        if let Some(provider) = self.provider_handle.take() {
            self.binder.unbind(provider.as_ref());
        }
        self.focus_ring.hide();
        self.set_state(LifecycleState::Unbound);
    }

    /// The host window gained or lost focus.
    ///
    /// Regaining focus after the system permission dialog is the signal
    /// used to re-check a pending request.
    pub fn window_focus_changed(&mut self, has_focus: bool) {
        if !has_focus
            || self.state != LifecycleState::PermissionPending
            || !self.gate.is_request_pending()
        {
            return;
        }
        log::info!("Window focus regained, re-checking camera permission");
        self.gate.settle_pending(self.permission_host.as_ref());
        self.evaluate_permission();
    }

    /// The host delivered the user's answer to the permission prompt.
    ///
    /// Recorded only; it is consumed on the next focus regain.
    pub fn permission_result(&mut self, granted: bool) {
        self.gate.record_result(granted);
    }

    /// Explicit user action that allows prompting again after a denial.
    pub fn clear_permission_denial(&mut self) {
        self.gate.clear_denial();
    }

    /// Preview surface size in view-local pixels.
    pub fn layout(&mut self, width: f32, height: f32) {
        self.surface.width = width.max(0.0);
        self.surface.height = height.max(0.0);
    }

    // --- Props ---

    /// Change lens. Rebinds immediately when a session is live.
    pub fn set_device(&mut self, device: DeviceSelector) {
        if !self.controls.set_device(device) {
            return;
        }
        if self.session.is_some() {
            log::info!("set_device() — rebinding for {}", device);
            self.set_state(LifecycleState::Binding);
            self.bind_session();
        }
    }

    pub fn switch_camera(&mut self) {
        let next = self.controls.config().device.toggled();
        self.set_device(next);
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        if let Some(event) = self.controls.set_zoom(zoom, self.session.as_ref()) {
            self.emit(event);
        }
    }

    pub fn set_flash_mode(&mut self, mode: FlashMode) {
        self.controls.set_flash(mode, self.session.as_ref());
    }

    pub fn set_focus_mode(&mut self, mode: FocusMode) {
        self.controls.set_focus_mode(mode);
    }

    pub fn set_enable_torch(&mut self, enabled: bool) {
        self.controls.set_torch(enabled, self.session.as_ref());
    }

    // --- Focus ---

    /// Programmatic focus at view-local `(x, y)`, regardless of focus mode.
    pub fn focus_at(&mut self, x: f32, y: f32) {
        self.controls
            .trigger_focus(x, y, &self.surface, self.session.as_ref());
    }

    /// Touch-down on the preview. Handled only in `tap` focus mode.
    ///
    /// Returns whether the touch was consumed.
    pub fn touch_down(&mut self, x: f32, y: f32) -> bool {
        if !self.controls.tap_focus_armed() {
            return false;
        }
        self.controls
            .trigger_focus(x, y, &self.surface, self.session.as_ref());
        self.emit(ElementEvent::TapFocus { x, y });
        self.focus_ring.show(x, y, &self.main.handle());
        true
    }

    // --- Capture ---

    /// Capture a still. `reply` always fires exactly once, possibly before
    /// this returns.
    pub fn take_photo(&mut self, reply: CaptureReply) -> Result<CaptureTicket, CaptureError> {
        let permitted = self.gate.is_granted(self.permission_host.as_ref());
        self.capture
            .capture(permitted, self.session.as_ref(), &self.main.handle(), reply)
    }

    // --- Main context ---

    /// Apply every queued completion without blocking. Returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Some(message) = self.main.try_pop() {
            self.handle(message);
            handled += 1;
        }
        handled
    }

    /// Wait up to `timeout` for one completion, then drain the rest.
    pub fn wait_and_run(&mut self, timeout: Duration) -> usize {
        match self.main.pop_timeout(timeout) {
            Some(message) => {
                self.handle(message);
                1 + self.run_pending()
            }
            None => 0,
        }
    }

    fn handle(&mut self, message: MainMessage) {
        match message {
            MainMessage::ProviderResolved { future, result } => {
                let Some(result) = self.provider.resolve(future, result) else {
                    return;
                };
                let waiting = self.awaiting_provider == Some(self.cycles.current())
                    && self.state == LifecycleState::Binding;
                if !waiting {
                    log::debug!("Provider resolved with no attach cycle waiting on it");
                    return;
                }
                self.awaiting_provider = None;
                match result {
                    Ok(provider) => {
                        self.provider_handle = Some(provider);
                        self.bind_session();
                    }
                    Err(e) => self.fail(BindError::from(e)),
                }
            }
            MainMessage::CaptureFinished { ticket, outcome } => {
                if !self.binder.is_current(ticket.session()) {
                    log::debug!("Dropping capture completion from replaced session");
                    return;
                }
                if let Some(Ok(result)) = self.capture.complete(ticket, outcome) {
                    self.emit(ElementEvent::PhotoCaptured(result));
                }
            }
            MainMessage::FocusRingExpired { display } => {
                self.focus_ring.expire(display);
            }
        }
    }

    // --- Transitions ---

    fn evaluate_permission(&mut self) {
        let was_pending = self.gate.is_request_pending();
        match self.gate.check_or_request(self.permission_host.as_ref()) {
            PermissionOutcome::Granted => {
                if was_pending {
                    self.provider.invalidate();
                }
                self.begin_binding();
            }
            PermissionOutcome::DeniedFinal(reason) => {
                self.set_state(LifecycleState::Denied(reason));
                self.emit(ElementEvent::error(ErrorCode::PermissionDenied, reason.to_string()));
            }
            PermissionOutcome::RequestStarted => {
                log::info!("Waiting for camera permission prompt");
            }
        }
    }

    fn begin_binding(&mut self) {
        self.set_state(LifecycleState::Binding);
        match self.provider.acquire(&self.main.handle()) {
            Acquire::Ready(provider) => {
                self.provider_handle = Some(provider);
                self.bind_session();
            }
            Acquire::Pending => {
                log::debug!("Waiting for camera provider");
                self.awaiting_provider = Some(self.cycles.current());
            }
            Acquire::Unavailable(e) => self.fail(BindError::from(e)),
        }
    }

    /// Unbind-then-bind for the current config, then re-apply controls
    /// before announcing readiness.
    fn bind_session(&mut self) {
        let Some(provider) = self.provider_handle.clone() else {
            log::debug!("bind_session() skipped, no provider");
            return;
        };
        if self.session.is_some() {
            self.capture.abort("camera session replaced");
        }
        let previous = self.session.take();

        let bound = self.binder.bind(
            provider.as_ref(),
            self.controls.config(),
            &self.surface,
            self.scope.as_deref(),
            previous,
        );
        match bound {
            Ok(session) => {
                let events = self.controls.reapply(&session);
                self.session = Some(session);
                for event in events {
                    self.emit(event);
                }
                self.set_state(LifecycleState::Ready);
                self.emit(ElementEvent::CameraReady);
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(&mut self, error: BindError) {
        let message = error.to_string();
        self.set_state(LifecycleState::Failed(error));
        self.emit(ElementEvent::error(ErrorCode::SessionError, message));
    }

    fn set_state(&mut self, state: LifecycleState) {
        log::debug!("state {} → {}", self.state.name(), state.name());
        self.state = state;
        if let Some(ref delegate) = self.delegate {
            delegate.on_state_changed(&self.state);
        }
    }

    fn emit(&self, event: ElementEvent) {
        if let ElementEvent::Error { code, message } = &event {
            log::warn!("Camera error {}: {}", code, message);
        }
        if let Some(ref delegate) = self.delegate {
            delegate.on_event(&event);
        }
    }
}
